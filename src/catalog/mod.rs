// src/catalog/mod.rs
//! # Species catalog
//!
//! Reference data for collectible assignment, built once per data refresh:
//! - `chain`: walk raw evolution trees into fixed 3-stage paths
//! - `species`: the immutable catalog and its builder
//! - `source`: raw dump input and the on-disk snapshot cache
//!
//! Typical call chain:
//! ```text
//! runner → catalog::load_or_build → snapshot (cache hit)
//!                                 ↘ dump → ChainResolver → CatalogBuilder → snapshot write
//! ```
pub mod chain;
pub mod source;
pub mod species;

pub use chain::{ChainResolver, EvolutionPath, EvolutionTree, SpeciesRef};
pub use source::{CatalogDump, CatalogSnapshot, CatalogSource, DumpCatalogSource, build_from};
pub use species::{CatalogBuilder, ChainInput, Species, SpeciesCatalog, SpeciesEntry};

use crate::config::options::CatalogOptions;
use crate::error::CatalogError;

pub type SpeciesId = u32;

/// Load the cached snapshot if present, readable and usable, otherwise build
/// from the dump and refresh the snapshot. An unusable catalog is never cached.
pub fn load_or_build(opts: &CatalogOptions) -> Result<SpeciesCatalog, CatalogError> {
    if !opts.rebuild && opts.snapshot_path.exists() {
        let cached = CatalogSnapshot::load(&opts.snapshot_path)
            .and_then(|snap| build_from(&snap))
            .and_then(|catalog| catalog.ensure_usable().map(|_| catalog));
        match cached {
            Ok(catalog) => {
                logd!("Catalog snapshot hit: {}", opts.snapshot_path.display());
                return Ok(catalog);
            }
            Err(e) => logw!("Ignoring catalog snapshot: {e}"),
        }
    }

    let catalog = build_from(&DumpCatalogSource::open(&opts.dump_path)?)?;
    catalog.ensure_usable()?;

    // Cache only; a failed write doesn't invalidate the catalog
    if let Err(e) = CatalogSnapshot::of(&catalog).save(&opts.snapshot_path) {
        logw!("Could not write catalog snapshot: {e}");
    }
    Ok(catalog)
}
