// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Page-specific knowledge of where the ground truth lives in the remote HTML
//! and how to pull it out robustly.
//!
//! ## What lives here
//! - **Pure HTML parsing** of fetched pages into raw rows of text cells.
//! - **Upstream discard rules** (header rows, short rows, blank names).
//!
//! ## What does **not** live here
//! - **Typing of cells** (`record::RowFields`) or collectible assignment (`engine`).
//! - **Persistence** (`store`).
//!
//! ## Typical call chain
//! ```text
//! runner → RosterInput::rows() → Vec<raw row>
//!                               ↘ record::RowFields::extract per row
//! ```
//!
//! ## Testing notes
//! - Specs are testable offline against inline HTML fixtures.
pub mod roster;
