// src/catalog/source.rs
//! Where catalog data comes from.
//!
//! - `DumpCatalogSource`: a JSON dump of species + raw evolution trees, in the
//!   shape of the public species/evolution API.
//! - `CatalogSnapshot`: a built catalog written back to disk. Reloading feeds
//!   its chains through the builder again as pre-resolved chain lists.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::SpeciesId;
use super::chain::{EvolutionPath, EvolutionTree};
use super::species::{CatalogBuilder, ChainInput, SpeciesCatalog, SpeciesEntry};
use crate::error::CatalogError;

pub trait CatalogSource {
    fn species(&self) -> Result<Vec<SpeciesEntry>, CatalogError>;
    fn chains(&self) -> Result<Vec<ChainInput>, CatalogError>;
}

/// Run every chain from `source` through the builder.
pub fn build_from(source: &dyn CatalogSource) -> Result<SpeciesCatalog, CatalogError> {
    let mut builder = CatalogBuilder::new();
    for entry in source.species()? {
        builder.add_species(entry);
    }
    for chain in source.chains()? {
        builder.add_chain(chain);
    }
    builder.build()
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, CatalogError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text)
        .map_err(|source| CatalogError::Json { path: path.to_path_buf(), source })
}

/* ---------------- Raw dump ---------------- */

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogDump {
    #[serde(default)]
    pub species: Vec<SpeciesEntry>,
    #[serde(default)]
    pub chains: Vec<EvolutionTree>,
}

pub struct DumpCatalogSource {
    dump: CatalogDump,
}

impl DumpCatalogSource {
    pub fn new(dump: CatalogDump) -> Self { Self { dump } }

    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let dump: CatalogDump = read_json(path)?;
        logd!(
            "Loaded dump {}: {} species, {} chains",
            path.display(), dump.species.len(), dump.chains.len()
        );
        Ok(Self::new(dump))
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self::new)
    }
}

impl CatalogSource for DumpCatalogSource {
    fn species(&self) -> Result<Vec<SpeciesEntry>, CatalogError> {
        Ok(self.dump.species.clone())
    }

    fn chains(&self) -> Result<Vec<ChainInput>, CatalogError> {
        Ok(self.dump.chains.iter().cloned().map(ChainInput::Tree).collect())
    }
}

/* ---------------- Snapshot ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub total_species: usize,
    pub total_chains: usize,
    pub total_elite: usize,
    /// Hex, as logged by the builder
    pub fingerprint: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub species_names: BTreeMap<SpeciesId, String>,
    /// General paths first (in catalog order), then elite-containing ones
    pub evolution_chains: Vec<EvolutionPath>,
    pub elite: Vec<SpeciesId>,
    pub metadata: SnapshotMeta,
}

impl CatalogSnapshot {
    pub fn of(catalog: &SpeciesCatalog) -> Self {
        let species_names = catalog
            .species_sorted()
            .into_iter()
            .map(|s| (s.id, s.name.clone()))
            .collect();
        let evolution_chains: Vec<EvolutionPath> = catalog
            .paths()
            .iter()
            .chain(catalog.elite_paths())
            .copied()
            .collect();

        Self {
            metadata: SnapshotMeta {
                total_species: catalog.species_count(),
                total_chains: catalog.paths().len(),
                total_elite: catalog.elite().len(),
                fingerprint: format!("{:016x}", catalog.fingerprint()),
            },
            species_names,
            evolution_chains,
            elite: catalog.elite().to_vec(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        read_json(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|source| CatalogError::Json { path: path.to_path_buf(), source })?;
        crate::file::write_atomic(path, json.as_bytes())
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })
    }
}

impl CatalogSource for CatalogSnapshot {
    fn species(&self) -> Result<Vec<SpeciesEntry>, CatalogError> {
        Ok(self
            .species_names
            .iter()
            .map(|(&id, name)| SpeciesEntry::new(id, name, self.elite.contains(&id), false))
            .collect())
    }

    fn chains(&self) -> Result<Vec<ChainInput>, CatalogError> {
        Ok(self
            .evolution_chains
            .iter()
            .map(|p| ChainInput::Resolved(p.stages().to_vec()))
            .collect())
    }
}
