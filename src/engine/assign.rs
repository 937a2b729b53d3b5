// src/engine/assign.rs
//! Participant → collectible assignment.
//!
//! On first sighting a participant gets a chain index and an elite index,
//! drawn once from the injected `RandomSource`. Every later sighting only
//! updates the last seen score; the species shown is then a pure function of
//! (catalog, stored indices, score band).

use std::collections::btree_map::Entry;

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::types::{Assignment, AssignmentRecord, AssignmentStore, ParticipantKey, Tier};
use crate::catalog::SpeciesCatalog;
use crate::error::EngineError;

/// Uniform index draw in `0..len`. `len` is never 0.
pub trait RandomSource {
    fn pick_index(&mut self, len: usize) -> usize;
}

/// `RandomSource` over any `rand` generator.
pub struct RngSource<R: Rng>(R);

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self { Self(StdRng::from_entropy()) }
    pub fn seeded(seed: u64) -> Self { Self(StdRng::seed_from_u64(seed)) }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick_index(&mut self, len: usize) -> usize { self.0.gen_range(0..len) }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn pick_index(&mut self, len: usize) -> usize { (**self).pick_index(len) }
}

/// Owns the assignment store for the length of one cycle.
pub struct AssignmentEngine<'c, R: RandomSource> {
    catalog: &'c SpeciesCatalog,
    store: AssignmentStore,
    rng: R,
}

impl<'c, R: RandomSource> AssignmentEngine<'c, R> {
    /// Fails fast on a catalog with nothing to draw from.
    pub fn new(
        catalog: &'c SpeciesCatalog,
        store: AssignmentStore,
        rng: R,
    ) -> Result<Self, EngineError> {
        catalog.ensure_usable()?;
        Ok(Self { catalog, store, rng })
    }

    pub fn catalog(&self) -> &'c SpeciesCatalog { self.catalog }

    pub fn store(&self) -> &AssignmentStore { &self.store }

    pub fn into_store(self) -> AssignmentStore { self.store }

    /// Species and tier for `name` at `score`, recording the sighting.
    /// Below the engagement floor nothing is recorded.
    pub fn assign(&mut self, name: &str, score: u32) -> Result<Assignment, EngineError> {
        let tier = Tier::for_score(score).ok_or(EngineError::Ineligible { score })?;
        let key = ParticipantKey::normalize(name);

        let paths = self.catalog.paths().len();
        let elite = self.catalog.elite().len();
        let rng = &mut self.rng;

        let rec = match self.store.entry(key) {
            Entry::Vacant(v) => {
                let rec = AssignmentRecord {
                    chain_index: Some(rng.pick_index(paths)),
                    elite_index: Some(rng.pick_index(elite)),
                    last_score: score,
                };
                logd!("New participant {}: chain {:?} elite {:?}", v.key(), rec.chain_index, rec.elite_index);
                v.insert(rec)
            }
            Entry::Occupied(o) => {
                let rec = o.into_mut();
                rec.last_score = score;
                rec
            }
        };

        // Unset or stale (catalog shrank since the record was written): draw once now.
        let chain_index = *rec
            .chain_index
            .get_or_insert_with(|| rng.pick_index(paths));
        let chain_index = if chain_index < paths {
            chain_index
        } else {
            logw!("Chain index {chain_index} out of range ({paths} paths), redrawing");
            let i = rng.pick_index(paths);
            rec.chain_index = Some(i);
            i
        };
        let elite_index = *rec
            .elite_index
            .get_or_insert_with(|| rng.pick_index(elite));
        let elite_index = if elite_index < elite {
            elite_index
        } else {
            logw!("Elite index {elite_index} out of range ({elite} elite), redrawing");
            let i = rng.pick_index(elite);
            rec.elite_index = Some(i);
            i
        };

        let species_id = match tier.stage() {
            None => self.catalog.elite()[elite_index],
            Some(stage) => self.catalog.paths()[chain_index].stages()[stage],
        };
        Ok(Assignment { species_id, tier })
    }
}
