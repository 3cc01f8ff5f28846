//! Journal use-case service.
//!
//! # Responsibility
//! - Provide the add/replay/search/count/export entry points for callers.
//! - Compose store scans with query operators and renderers.
//!
//! # Invariants
//! - Every read use-case starts exactly one fresh scan.
//! - Service layer remains storage-agnostic.

use crate::config::JournalConfig;
use crate::export::markdown::export_markdown;
use crate::model::entry::Entry;
use crate::query::{summarize, EntryQuery, JournalStats, Matching, TextSearch};
use crate::store::{EntryStore, JsonlStore, StoreResult};
use log::info;
use std::iter::Take;

/// Use-case facade over an [`EntryStore`].
pub struct JournalService<S: EntryStore> {
    store: S,
}

impl JournalService<JsonlStore> {
    /// Opens the JSONL journal named by `config`. No I/O happens here.
    pub fn open(config: &JournalConfig) -> Self {
        Self::new(JsonlStore::new(config.store_path()))
    }
}

impl<S: EntryStore> JournalService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates input, stamps the entry with the current time and appends it.
    ///
    /// # Errors
    /// - Validation errors before any I/O.
    /// - Store I/O errors from the append.
    pub fn add<T: AsRef<str>>(&self, text: &str, tags: &[T]) -> StoreResult<Entry> {
        let entry = Entry::new(text, tags)?;
        self.store.append(&entry)?;
        Ok(entry)
    }

    /// Lazy scan of every entry in append order.
    pub fn entries(&self) -> S::Scan {
        self.store.scan()
    }

    /// Lazy scan filtered by `query`.
    pub fn query(&self, query: EntryQuery) -> Take<Matching<S::Scan, EntryQuery>> {
        query.apply(self.store.scan())
    }

    /// Collects entries whose text matches `search`.
    pub fn search(&self, search: TextSearch) -> StoreResult<Vec<Entry>> {
        let hits = self
            .query(EntryQuery::new().with_search(search))
            .collect::<StoreResult<Vec<_>>>()?;
        info!(
            "event=journal_search module=service status=ok hits={}",
            hits.len()
        );
        Ok(hits)
    }

    /// Aggregates statistics in one pass.
    pub fn stats(&self) -> StoreResult<JournalStats> {
        let stats = summarize(self.store.scan())?;
        info!(
            "event=journal_stats module=service status=ok total={} days={} tags={}",
            stats.total,
            stats.by_day.len(),
            stats.by_tag.len()
        );
        Ok(stats)
    }

    /// Renders the whole journal as Markdown.
    pub fn export_markdown(&self) -> StoreResult<String> {
        export_markdown(self.store.scan())
    }
}
