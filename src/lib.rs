// src/lib.rs
// #![allow(dead_code)]
// #![allow(unused)]

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod catalog;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod specs;

pub mod file;
pub mod progress;
pub mod record;
pub mod runner;
pub mod store;
