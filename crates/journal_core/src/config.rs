//! Journal configuration.
//!
//! # Responsibility
//! - Carry the journal location explicitly instead of process-wide state.
//!
//! # Invariants
//! - Core never reads environment variables; callers resolve paths.

use std::path::{Path, PathBuf};

/// Default journal file name, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "journal.jsonl";

/// Settings needed to open a journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalConfig {
    pub store_path: PathBuf,
}

impl JournalConfig {
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
        }
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_FILE)
    }
}
