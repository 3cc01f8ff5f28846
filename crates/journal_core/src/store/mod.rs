//! Append-only JSONL journal storage.
//!
//! # Responsibility
//! - Append one encoded entry per line, durably.
//! - Replay the journal as a lazy, forward-only entry stream.
//! - Expose a store contract so services stay storage-agnostic.
//!
//! # Invariants
//! - Prior bytes of the journal are never rewritten.
//! - A missing journal file is an empty journal, never an error.
//! - Malformed lines are skipped by readers; they never abort a scan.

use crate::model::entry::{Entry, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

mod reader;
mod writer;

pub use reader::{read_all, Entries};
pub use writer::{append, append_entry};

pub type StoreResult<T> = Result<T, StoreError>;

/// Fatal store-level error for one journal operation.
#[derive(Debug)]
pub enum StoreError {
    /// Caller input rejected before any I/O.
    Validation(ValidationError),
    /// Entry could not be serialized.
    Encode(serde_json::Error),
    /// Journal path could not be created, opened, written or read.
    Io { path: PathBuf, source: io::Error },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode entry: {err}"),
            Self::Io { path, source } => {
                write!(f, "journal I/O failed at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Storage contract for journal services.
pub trait EntryStore {
    /// Lazy scan type returned by [`EntryStore::scan`].
    type Scan: Iterator<Item = StoreResult<Entry>>;

    /// Validates and appends one already-built entry at the end of the store.
    fn append(&self, entry: &Entry) -> StoreResult<()>;
    /// Starts a fresh scan from the first record.
    fn scan(&self) -> Self::Scan;
}

/// JSONL file-backed store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntryStore for JsonlStore {
    type Scan = Entries;

    fn append(&self, entry: &Entry) -> StoreResult<()> {
        append_entry(&self.path, entry)
    }

    fn scan(&self) -> Self::Scan {
        read_all(&self.path)
    }
}
