// src/engine/types.rs
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::SpeciesId;
use crate::config::consts::{ELITE_FLOOR, ENGAGEMENT_FLOOR, EVOLVED_FLOOR, FINAL_FLOOR};

/// Participant name, trimmed and case-folded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantKey(String);

impl ParticipantKey {
    pub fn normalize(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ParticipantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Per-participant state. Indices are drawn once and kept until a reset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    #[serde(default)]
    pub chain_index: Option<usize>,
    #[serde(default)]
    pub elite_index: Option<usize>,
    #[serde(default)]
    pub last_score: u32,
}

/// Normalized key → record. Cleared only in bulk.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentStore {
    records: BTreeMap<ParticipantKey, AssignmentRecord>,
}

impl AssignmentStore {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn get(&self, key: &ParticipantKey) -> Option<&AssignmentRecord> {
        self.records.get(key)
    }

    pub fn contains(&self, key: &ParticipantKey) -> bool { self.records.contains_key(key) }

    pub(crate) fn entry(&mut self, key: ParticipantKey) -> Entry<'_, ParticipantKey, AssignmentRecord> {
        self.records.entry(key)
    }

    /// Seed a record directly (fixtures, migrations).
    pub fn insert(&mut self, key: ParticipantKey, record: AssignmentRecord) {
        self.records.insert(key, record);
    }

    /// Sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantKey, &AssignmentRecord)> {
        self.records.iter()
    }

    /// Drop every record (reset boundary).
    pub fn clear(&mut self) { self.records.clear(); }
}

/// Display tier, by score band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    Evolved,
    Final,
    Legendary,
}

impl Tier {
    /// Highest band whose inclusive floor `score` reaches; `None` below the
    /// engagement floor.
    pub fn for_score(score: u32) -> Option<Tier> {
        match score {
            s if s >= ELITE_FLOOR => Some(Tier::Legendary),
            s if s >= FINAL_FLOOR => Some(Tier::Final),
            s if s >= EVOLVED_FLOOR => Some(Tier::Evolved),
            s if s >= ENGAGEMENT_FLOOR => Some(Tier::Basic),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Basic => "basic",
            Tier::Evolved => "evolved",
            Tier::Final => "final",
            Tier::Legendary => "legendary",
        }
    }

    /// Stage index into an evolution path; `None` for the elite tier.
    pub fn stage(&self) -> Option<usize> {
        match self {
            Tier::Basic => Some(0),
            Tier::Evolved => Some(1),
            Tier::Final => Some(2),
            Tier::Legendary => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub species_id: SpeciesId,
    pub tier: Tier,
}
