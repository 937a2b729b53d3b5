// src/core/mod.rs

pub mod hash;
pub mod html;
pub mod net;
pub mod sanitize;
