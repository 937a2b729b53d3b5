// src/engine/reset.rs
//! Reset boundary detection.
//!
//! Upstream scores drop back to zero on a fixed cadence and there is no epoch
//! field to read, so the only signal is a tracked participant who was on the
//! board last time and now reads exactly 0. Absence from the snapshot is not
//! a zero. Participants not yet in the store are never looked at.

use std::collections::HashMap;

use super::types::{AssignmentStore, ParticipantKey};
use crate::config::consts::ON_BOARD_THRESHOLD;

/// The participant whose drop triggered the reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResetEvidence {
    pub key: ParticipantKey,
    pub previous: u32,
}

/// First tracked participant (in key order) showing an on-board → 0 drop.
pub fn detect(
    store: &AssignmentStore,
    current: &HashMap<ParticipantKey, u32>,
) -> Option<ResetEvidence> {
    store
        .iter()
        .find(|(key, rec)| rec.last_score >= ON_BOARD_THRESHOLD && current.get(*key) == Some(&0))
        .map(|(key, rec)| ResetEvidence { key: key.clone(), previous: rec.last_score })
}

pub fn should_reset(store: &AssignmentStore, current: &HashMap<ParticipantKey, u32>) -> bool {
    detect(store, current).is_some()
}
