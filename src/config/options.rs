// src/config/options.rs
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    /// Saved roster page, or an `http://` URL
    pub roster: String,
    pub catalog: CatalogOptions,
    pub store: StoreOptions,
    /// Fixed seed for the first-sighting index draw; entropy when unset
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            roster: s!("roster.html"),
            catalog: CatalogOptions::default(),
            store: StoreOptions::default(),
            seed: None,
            log_level: s!("info"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOptions {
    pub dump_path: PathBuf,
    pub snapshot_path: PathBuf,
    /// Ignore any cached snapshot and rebuild from the dump
    pub rebuild: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            dump_path: PathBuf::from(STORE_DIR).join(CATALOG_DUMP_FILE),
            snapshot_path: PathBuf::from(STORE_DIR).join(CATALOG_SNAPSHOT_FILE),
            rebuild: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    pub assignments_path: PathBuf,
    pub records_path: PathBuf,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            assignments_path: PathBuf::from(STORE_DIR).join(ASSIGNMENTS_FILE),
            records_path: PathBuf::from(DEFAULT_OUT_DIR).join(DEFAULT_RECORDS_FILE),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("parsing {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

impl AppOptions {
    /// Load from a TOML file. A missing file is not an error: defaults apply.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            logd!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn log_path() -> PathBuf {
        PathBuf::from(STORE_DIR).join(LOG_FILE)
    }
}
