//! Substring search over entry text.
//!
//! # Invariants
//! - Only `text` is searched; tags and timestamps are ignored.
//! - Case-insensitive mode lowercases both sides with Unicode default case
//!   mapping (`str::to_lowercase`), independent of the process locale.
//! - An empty query matches every entry.

use super::EntryFilter;
use crate::model::entry::Entry;

/// Text search predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSearch {
    needle: String,
    case_sensitive: bool,
}

impl TextSearch {
    /// Builds a search; the query is lowercased once up front when
    /// `case_sensitive` is false.
    pub fn new(query: impl Into<String>, case_sensitive: bool) -> Self {
        let query = query.into();
        let needle = if case_sensitive {
            query
        } else {
            query.to_lowercase()
        };
        Self {
            needle,
            case_sensitive,
        }
    }

    /// Default case-insensitive search.
    pub fn insensitive(query: impl Into<String>) -> Self {
        Self::new(query, false)
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Returns whether `text` contains the query under this search's mode.
    pub fn matches_text(&self, text: &str) -> bool {
        if self.case_sensitive {
            text.contains(self.needle.as_str())
        } else {
            text.to_lowercase().contains(self.needle.as_str())
        }
    }
}

impl EntryFilter for TextSearch {
    fn matches(&self, entry: &Entry) -> bool {
        self.matches_text(&entry.text)
    }
}
