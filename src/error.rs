// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// An evolution node matched no known name and carried no usable reference.
    #[error("unresolvable species reference: name={name:?} url={url:?}")]
    UnresolvableSpecies { name: String, url: String },

    #[error("catalog unusable: {paths} general paths, {elite} elite species")]
    EmptyCatalog { paths: usize, elite: usize },

    #[error("{path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("{path}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Below the engagement floor; nothing was recorded.
    #[error("score {score} is below the engagement floor")]
    Ineligible { score: u32 },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("encoding {what}: {source}")]
    Json { what: &'static str, source: serde_json::Error },
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("{path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("no roster table found")]
    NoTable,
}

/// Anything that aborts a whole scrape cycle.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Roster(#[from] RosterError),
}
