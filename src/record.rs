// src/record.rs
//! Raw roster cells → externally visible participant records.

use serde::{Deserialize, Serialize};

use crate::catalog::SpeciesId;
use crate::config::consts::*;
use crate::core::hash::Fnv64;
use crate::engine::{AssignmentEngine, RandomSource, Tier};
use crate::error::EngineError;

/// One emitted participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub id: String,
    pub name: String,
    pub puzzles: u32,
    pub weekly_score: u32,
    pub rating: u32,
    pub group: String,
    pub species_id: SpeciesId,
    pub species_name: String,
    pub tier: Tier,
    pub delta: u32,
}

/// Typed view of one roster row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowFields {
    pub name: String,
    pub puzzles: u32,
    pub score: u32,
    pub rating: u32,
    pub group: String,
}

impl RowFields {
    /// Missing or non-numeric stat cells read as 0. `None` only for a blank name.
    pub fn extract(cells: &[String]) -> Option<Self> {
        let cell = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");
        let name = cell(COL_NAME).trim();
        if name.is_empty() { return None; }

        Some(Self {
            name: s!(name),
            puzzles: parse_stat(cell(COL_PUZZLES)),
            score: parse_stat(cell(COL_SCORE)),
            rating: parse_stat(cell(COL_RATING)),
            group: s!(cell(COL_GROUP).trim()),
        })
    }
}

/// Digits only ("1,234" → 1234). Empty or overflowing → 0.
pub fn parse_stat(cell: &str) -> u32 {
    let digits: String = cell.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// "Dr. Ada King" → "dr-ada-king"
pub fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-").replace('.', "")
}

/// Cosmetic movement indicator in `0..=MAX_DELTA`.
pub fn delta(slug: &str, score: u32) -> u32 {
    let mut h = Fnv64::new();
    h.write(slug.as_bytes());
    h.write_u32(score);
    (h.finish() % (MAX_DELTA as u64 + 1)) as u32
}

/// Record for one row, or `None` below the engagement floor (such rows are
/// not shown and do not touch the store).
pub fn build<R: RandomSource>(
    fields: &RowFields,
    engine: &mut AssignmentEngine<'_, R>,
) -> Result<Option<ParticipantRecord>, EngineError> {
    if fields.score < ENGAGEMENT_FLOOR {
        return Ok(None);
    }
    let assignment = engine.assign(&fields.name, fields.score)?;
    let species_name = engine
        .catalog()
        .name(assignment.species_id)
        .unwrap_or(UNKNOWN_SPECIES);

    let id = slug(&fields.name);
    Ok(Some(ParticipantRecord {
        delta: delta(&id, fields.score),
        id,
        name: fields.name.clone(),
        puzzles: fields.puzzles,
        weekly_score: fields.score,
        rating: fields.rating,
        group: fields.group.clone(),
        species_id: assignment.species_id,
        species_name: s!(species_name),
        tier: assignment.tier,
    }))
}
