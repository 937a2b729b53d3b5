// src/store.rs
//! Persistence between cycles.
//!
//! Two documents: the assignment store (participant key → indices + last
//! score) and the emitted participant records. Saves are all-or-nothing; a
//! missing or unreadable assignment file loads as an empty store.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::options::StoreOptions;
use crate::engine::AssignmentStore;
use crate::error::StoreError;
use crate::record::ParticipantRecord;

pub trait Store {
    /// Never fails: missing or corrupt state means a fresh start.
    fn load_assignments(&self) -> AssignmentStore;
    fn save_assignments(&self, store: &AssignmentStore) -> Result<(), StoreError>;
    fn save_records(&self, records: &[ParticipantRecord]) -> Result<(), StoreError>;

    /// End-of-cycle persist. Records are skipped when empty so the previous
    /// output stays in place.
    fn save_cycle(&self, store: &AssignmentStore, records: &[ParticipantRecord]) -> Result<(), StoreError> {
        self.save_assignments(store)?;
        if !records.is_empty() {
            self.save_records(records)?;
        }
        Ok(())
    }
}

/// JSON files on local disk.
#[derive(Clone, Debug)]
pub struct FileStore {
    assignments_path: PathBuf,
    records_path: PathBuf,
}

impl FileStore {
    pub fn new(assignments_path: impl Into<PathBuf>, records_path: impl Into<PathBuf>) -> Self {
        Self { assignments_path: assignments_path.into(), records_path: records_path.into() }
    }

    pub fn from_options(opts: &StoreOptions) -> Self {
        Self::new(&opts.assignments_path, &opts.records_path)
    }

    pub fn assignments_path(&self) -> &Path { &self.assignments_path }
    pub fn records_path(&self) -> &Path { &self.records_path }
}

fn to_json<T: Serialize + ?Sized>(what: &'static str, value: &T) -> Result<String, StoreError> {
    serde_json::to_string_pretty(value).map_err(|source| StoreError::Json { what, source })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, what: &'static str, value: &T) -> Result<(), StoreError> {
    let json = to_json(what, value)?;
    crate::file::write_atomic(path, json.as_bytes())
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })
}

impl Store for FileStore {
    fn load_assignments(&self) -> AssignmentStore {
        let path = &self.assignments_path;
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                logf!("No assignments at {} ({e}), starting fresh", path.display());
                return AssignmentStore::new();
            }
        };
        match serde_json::from_str::<AssignmentStore>(&text) {
            Ok(store) => {
                logf!("Loaded {} participant assignments", store.len());
                store
            }
            Err(e) => {
                logw!("Assignments at {} unreadable ({e}), starting fresh", path.display());
                AssignmentStore::new()
            }
        }
    }

    fn save_assignments(&self, store: &AssignmentStore) -> Result<(), StoreError> {
        write_json(&self.assignments_path, "assignments", store)?;
        logf!("Saved {} participant assignments", store.len());
        Ok(())
    }

    fn save_records(&self, records: &[ParticipantRecord]) -> Result<(), StoreError> {
        write_json(&self.records_path, "records", records)?;
        logf!("Wrote {} participants to {}", records.len(), self.records_path.display());
        Ok(())
    }

    /// Both documents are staged before either is replaced.
    fn save_cycle(&self, store: &AssignmentStore, records: &[ParticipantRecord]) -> Result<(), StoreError> {
        let assignments = to_json("assignments", store)?;
        let output = if records.is_empty() { None } else { Some(to_json("records", records)?) };
        let mut files = vec![(self.assignments_path.as_path(), assignments.as_bytes())];
        if let Some(out) = &output {
            files.push((self.records_path.as_path(), out.as_bytes()));
        }
        crate::file::write_atomic_all(&files)
            .map_err(|(path, source)| StoreError::Io { path, source })?;
        logf!("Saved {} participant assignments, {} records", store.len(), records.len());
        Ok(())
    }
}
