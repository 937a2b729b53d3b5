// src/progress.rs
/// Lightweight progress reporting used by long-running operations (a scrape cycle).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of roster rows.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called for each participant that made it into the output.
    fn item_done(&mut self, _name: &str, _score: u32) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
