// src/catalog/species.rs
//! Species catalog: id → species, the general path list, and the elite list.
//!
//! Built once per data refresh and read-only afterwards. Indices into
//! `paths()` and `elite()` are persisted per participant, so both lists are
//! ordered deterministically:
//! - paths in first-seen order over the chain inputs, duplicates collapsed
//! - elite ids ascending
//!
//! Any path touching an elite species is kept out of the general list;
//! elite species are only reachable through the elite list.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::SpeciesId;
use super::chain::{ChainResolver, EvolutionPath, EvolutionTree};
use crate::core::hash::Fnv64;
use crate::error::CatalogError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub id: SpeciesId,
    pub name: String,
    /// Legendary or mythical
    pub elite: bool,
}

/// One species as a catalog source reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesEntry {
    pub id: SpeciesId,
    pub name: String,
    #[serde(default)]
    pub is_legendary: bool,
    #[serde(default)]
    pub is_mythical: bool,
}

impl SpeciesEntry {
    pub fn new(id: SpeciesId, name: &str, is_legendary: bool, is_mythical: bool) -> Self {
        Self { id, name: s!(name), is_legendary, is_mythical }
    }

    pub fn is_elite(&self) -> bool { self.is_legendary || self.is_mythical }
}

/// Raw evolution data: either a tree still to be walked, or a chain that was
/// already flattened (e.g. read back from a snapshot).
#[derive(Clone, Debug)]
pub enum ChainInput {
    Tree(EvolutionTree),
    Resolved(Vec<SpeciesId>),
}

#[derive(Clone, Debug)]
pub struct SpeciesCatalog {
    species: HashMap<SpeciesId, Species>,
    paths: Vec<EvolutionPath>,
    elite_paths: Vec<EvolutionPath>,
    elite: Vec<SpeciesId>,
    fingerprint: u64,
}

impl SpeciesCatalog {
    pub fn species(&self, id: SpeciesId) -> Option<&Species> { self.species.get(&id) }

    pub fn name(&self, id: SpeciesId) -> Option<&str> {
        self.species.get(&id).map(|s| s.name.as_str())
    }

    pub fn species_count(&self) -> usize { self.species.len() }

    /// General-population paths (no elite species anywhere in them).
    pub fn paths(&self) -> &[EvolutionPath] { &self.paths }

    /// Paths excluded from `paths()` because they contain an elite species.
    pub fn elite_paths(&self) -> &[EvolutionPath] { &self.elite_paths }

    pub fn elite(&self) -> &[SpeciesId] { &self.elite }

    pub fn is_elite(&self, id: SpeciesId) -> bool {
        self.species.get(&id).is_some_and(|s| s.elite)
    }

    /// Stable across processes for identical inputs.
    pub fn fingerprint(&self) -> u64 { self.fingerprint }

    /// At least one general path and one elite species, or assignment has
    /// nothing to draw from.
    pub fn ensure_usable(&self) -> Result<(), CatalogError> {
        if self.paths.is_empty() || self.elite.is_empty() {
            return Err(CatalogError::EmptyCatalog {
                paths: self.paths.len(),
                elite: self.elite.len(),
            });
        }
        Ok(())
    }

    /// Species sorted by id.
    pub fn species_sorted(&self) -> Vec<&Species> {
        let mut v: Vec<&Species> = self.species.values().collect();
        v.sort_by_key(|s| s.id);
        v
    }
}

fn fingerprint(paths: &[EvolutionPath], elite: &[SpeciesId]) -> u64 {
    let mut h = Fnv64::new();
    h.write_u32(paths.len() as u32);
    for p in paths {
        for &id in p.stages() {
            h.write_u32(id);
        }
    }
    h.write_u32(elite.len() as u32);
    for &id in elite {
        h.write_u32(id);
    }
    h.finish()
}

#[derive(Default)]
pub struct CatalogBuilder {
    species: BTreeMap<SpeciesId, Species>,
    chains: Vec<ChainInput>,
}

impl CatalogBuilder {
    pub fn new() -> Self { Self::default() }

    /// Entries with id 0 or a blank name are skipped; sources may be partial.
    pub fn add_species(&mut self, entry: SpeciesEntry) -> &mut Self {
        let name = entry.name.trim();
        if entry.id == 0 || name.is_empty() {
            logw!("Skipping species entry id={} name={:?}", entry.id, entry.name);
            return self;
        }
        self.species.insert(
            entry.id,
            Species { id: entry.id, name: s!(name), elite: entry.is_elite() },
        );
        self
    }

    pub fn add_chain(&mut self, chain: ChainInput) -> &mut Self {
        self.chains.push(chain);
        self
    }

    pub fn add_tree(&mut self, tree: EvolutionTree) -> &mut Self {
        self.add_chain(ChainInput::Tree(tree))
    }

    pub fn add_resolved(&mut self, stages: Vec<SpeciesId>) -> &mut Self {
        self.add_chain(ChainInput::Resolved(stages))
    }

    pub fn build(self) -> Result<SpeciesCatalog, CatalogError> {
        let resolver =
            ChainResolver::new(self.species.values().map(|s| (s.id, s.name.as_str())));

        let mut resolved: Vec<EvolutionPath> = Vec::new();
        for chain in &self.chains {
            match chain {
                ChainInput::Tree(tree) => resolver.resolve(tree, &mut resolved)?,
                ChainInput::Resolved(stages) => match EvolutionPath::from_stages(stages) {
                    Some(p) => resolved.push(p),
                    None => logw!("Skipping empty resolved chain"),
                },
            }
        }

        let mut seen: HashSet<EvolutionPath> = HashSet::with_capacity(resolved.len());
        let mut unique = Vec::with_capacity(resolved.len());
        let mut skipped = 0usize;
        for path in resolved {
            if let Some(missing) = path.stages().iter().find(|&&id| !self.species.contains_key(&id)) {
                logd!("Skipping path {:?}: species {} not in table", path.stages(), missing);
                skipped += 1;
                continue;
            }
            if seen.insert(path) {
                unique.push(path);
            }
        }
        if skipped > 0 {
            logw!("Skipped {skipped} evolution paths referencing unknown species");
        }

        let elite: Vec<SpeciesId> =
            self.species.values().filter(|s| s.elite).map(|s| s.id).collect();
        let elite_set: HashSet<SpeciesId> = elite.iter().copied().collect();

        let (paths, elite_paths): (Vec<_>, Vec<_>) = unique
            .into_iter()
            .partition(|p| !p.stages().iter().any(|id| elite_set.contains(id)));

        let fingerprint = fingerprint(&paths, &elite);
        logf!(
            "Catalog built: {} species, {} paths ({} elite-containing excluded), {} elite, fingerprint {:016x}",
            self.species.len(), paths.len(), elite_paths.len(), elite.len(), fingerprint
        );

        Ok(SpeciesCatalog {
            species: self.species.into_iter().collect(),
            paths,
            elite_paths,
            elite,
            fingerprint,
        })
    }
}
