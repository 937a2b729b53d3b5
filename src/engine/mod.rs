// src/engine/mod.rs
pub mod assign;
pub mod reset;
pub mod types;

pub use assign::{AssignmentEngine, RandomSource, RngSource};
pub use reset::{ResetEvidence, detect, should_reset};
pub use types::{Assignment, AssignmentRecord, AssignmentStore, ParticipantKey, Tier};
