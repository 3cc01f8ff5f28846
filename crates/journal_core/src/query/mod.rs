//! Read-side query operators over entry streams.
//!
//! # Responsibility
//! - Provide composable, stateless predicates (tag, since, text search).
//! - Reduce a stream into journal statistics.
//! - Combine predicates into one caller-facing [`EntryQuery`].
//!
//! # Invariants
//! - Operators never mutate entries and never touch the store directly.
//! - Store errors in a stream pass through filters unchanged.
//! - Output order equals input order.

use crate::model::entry::Entry;
use crate::store::StoreResult;

pub mod filter;
pub mod search;
pub mod stats;

pub use filter::{parse_since, SinceFilter, TagFilter};
pub use search::TextSearch;
pub use stats::{summarize, JournalStats};

/// Predicate over a single entry.
pub trait EntryFilter {
    fn matches(&self, entry: &Entry) -> bool;
}

impl<F> EntryFilter for F
where
    F: Fn(&Entry) -> bool,
{
    fn matches(&self, entry: &Entry) -> bool {
        self(entry)
    }
}

/// Stream adapter that keeps entries accepted by `filter`.
pub struct Matching<I, F> {
    inner: I,
    filter: F,
}

impl<I, F> Iterator for Matching<I, F>
where
    I: Iterator<Item = StoreResult<Entry>>,
    F: EntryFilter,
{
    type Item = StoreResult<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.inner.by_ref() {
            match item {
                Ok(entry) if !self.filter.matches(&entry) => continue,
                other => return Some(other),
            }
        }
        None
    }
}

/// Filter combinators for entry streams.
pub trait EntryStreamExt: Iterator<Item = StoreResult<Entry>> + Sized {
    /// Keeps entries accepted by `filter`.
    fn matching<F: EntryFilter>(self, filter: F) -> Matching<Self, F> {
        Matching {
            inner: self,
            filter,
        }
    }

    /// Keeps entries carrying `tag` (case-sensitive).
    fn tagged(self, tag: impl Into<String>) -> Matching<Self, TagFilter> {
        self.matching(TagFilter::new(tag))
    }

    /// Keeps entries at or after the filter's day boundary.
    fn since(self, filter: SinceFilter) -> Matching<Self, SinceFilter> {
        self.matching(filter)
    }

    /// Keeps entries whose text contains the search query.
    fn search(self, search: TextSearch) -> Matching<Self, TextSearch> {
        self.matching(search)
    }
}

impl<I> EntryStreamExt for I where I: Iterator<Item = StoreResult<Entry>> {}

/// Combined replay/search query.
///
/// Predicates apply in order: tag, since, search. `limit` caps the number
/// of yielded items and stops the scan early.
#[derive(Debug, Clone, Default)]
pub struct EntryQuery {
    pub tag: Option<String>,
    pub since: Option<SinceFilter>,
    pub search: Option<TextSearch>,
    pub limit: Option<usize>,
}

impl EntryQuery {
    /// Query that passes every entry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_since(mut self, since: SinceFilter) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_search(mut self, search: TextSearch) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Applies this query to an entry stream.
    pub fn apply<I>(self, entries: I) -> std::iter::Take<Matching<I, EntryQuery>>
    where
        I: Iterator<Item = StoreResult<Entry>>,
    {
        let limit = self.limit.unwrap_or(usize::MAX);
        entries.matching(self).take(limit)
    }
}

impl EntryFilter for EntryQuery {
    fn matches(&self, entry: &Entry) -> bool {
        if let Some(tag) = &self.tag {
            if !entry.has_tag(tag) {
                return false;
            }
        }
        if let Some(since) = &self.since {
            if !since.matches(entry) {
                return false;
            }
        }
        match &self.search {
            Some(search) => search.matches(entry),
            None => true,
        }
    }
}
