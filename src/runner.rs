// src/runner.rs
use std::collections::HashMap;

use crate::{
    catalog::{self, SpeciesCatalog},
    config::options::AppOptions,
    engine::{self, AssignmentEngine, ParticipantKey, RandomSource, ResetEvidence, RngSource},
    error::CycleError,
    progress::{NullProgress, Progress},
    record::{self, ParticipantRecord, RowFields},
    specs::roster::{RosterInput, RosterSource},
    store::{FileStore, Store},
};

/// What one cycle did.
#[derive(Clone, Debug)]
pub struct CycleSummary {
    pub rows_seen: usize,
    pub records_written: usize,
    pub records: Vec<ParticipantRecord>,
    /// Participants tracked after the cycle
    pub tracked: usize,
    pub reset: Option<ResetEvidence>,
    pub fingerprint: u64,
}

/// Top-level runner: catalog, roster, store and RNG from `opts`, then one cycle.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    opts: &AppOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<CycleSummary, CycleError> {
    let catalog = catalog::load_or_build(&opts.catalog)
        .inspect_err(|e| loge!("Catalog unavailable, cycle skipped: {e}"))?;
    let rows = RosterInput::parse(&opts.roster).rows()?;
    let store = FileStore::from_options(&opts.store);

    match opts.seed {
        Some(seed) => run_cycle(&catalog, &rows, &store, RngSource::seeded(seed), progress),
        None => run_cycle(&catalog, &rows, &store, RngSource::from_entropy(), progress),
    }
}

/// One full pass over a roster snapshot. Nothing is persisted unless every
/// row was processed.
pub fn run_cycle<R: RandomSource>(
    catalog: &SpeciesCatalog,
    rows: &[Vec<String>],
    store: &dyn Store,
    rng: R,
    progress: Option<&mut dyn Progress>,
) -> Result<CycleSummary, CycleError> {
    let mut null = NullProgress;
    let progress: &mut dyn Progress = match progress {
        Some(p) => p,
        None => &mut null,
    };
    progress.begin(rows.len());
    let result = cycle(catalog, rows, store, rng, &mut *progress);
    if let Err(e) = &result {
        loge!("Cycle aborted, previous output kept: {e}");
    }
    progress.finish();
    result
}

fn cycle<R: RandomSource>(
    catalog: &SpeciesCatalog,
    rows: &[Vec<String>],
    store: &dyn Store,
    rng: R,
    progress: &mut dyn Progress,
) -> Result<CycleSummary, CycleError> {
    catalog.ensure_usable()?;

    // First pass: every participant's score, zeros included
    let fields: Vec<RowFields> = rows.iter().filter_map(|r| RowFields::extract(r)).collect();
    let current: HashMap<ParticipantKey, u32> = fields
        .iter()
        .map(|f| (ParticipantKey::normalize(&f.name), f.score))
        .collect();
    logf!("First pass: {} rows, {} participants", rows.len(), current.len());

    let mut assignments = store.load_assignments();
    let reset = engine::detect(&assignments, &current);
    if let Some(ev) = &reset {
        let msg = format!(
            "Reset detected: {} went from {} to 0, clearing {} assignments",
            ev.key, ev.previous, assignments.len()
        );
        logf!("{msg}");
        progress.log(&msg);
        assignments.clear();
    }

    // Second pass: eligible participants only
    let mut engine = AssignmentEngine::new(catalog, assignments, rng)?;
    let mut records = Vec::new();
    for f in &fields {
        if let Some(rec) = record::build(f, &mut engine)? {
            logd!("Participant {} ({}): {} {}", rec.name, rec.weekly_score, rec.tier, rec.species_name);
            progress.item_done(&rec.name, rec.weekly_score);
            records.push(rec);
        }
    }

    let assignments = engine.into_store();
    if records.is_empty() {
        logw!("No participants at or above the floor; previous output left untouched");
    }
    store.save_cycle(&assignments, &records)?;

    Ok(CycleSummary {
        rows_seen: rows.len(),
        tracked: assignments.len(),
        records_written: records.len(),
        records,
        reset,
        fingerprint: catalog.fingerprint(),
    })
}
