pub mod checker;
pub mod cli;
pub mod config;
pub mod error;

pub use checker::dictionary::{WordTable, DEFAULT_BUCKETS, LENGTH};
pub use checker::SpellChecker;
pub use config::Config;
pub use error::DictionaryError;

use std::path::PathBuf;
use std::time::Duration;

/// Outcome of checking one text.
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub file: PathBuf,
    pub words_in_text: usize,
    /// Misspelled words in the order they appear, repeats included.
    pub misspelled: Vec<String>,
}

/// Time spent in each dictionary operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timings {
    pub load: Duration,
    pub check: Duration,
    pub size: Duration,
    pub unload: Duration,
}

impl Timings {
    pub fn total(&self) -> Duration {
        self.load + self.check + self.size + self.unload
    }
}

/// Totals for a whole run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub words_misspelled: usize,
    pub words_in_dictionary: usize,
    pub words_in_text: usize,
    pub timings: Timings,
}
