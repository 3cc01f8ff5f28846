//! Core logic for the append-only JSONL journal.
//! This crate is the single source of truth for journal invariants.

pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod store;

pub use config::{JournalConfig, DEFAULT_STORE_FILE};
pub use export::markdown::{export_markdown, render_markdown, MarkdownExporter};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{
    decode, encode, format_timestamp, normalize_tags, parse_tag_list, DecodeError, Entry,
    ValidationError,
};
pub use query::{
    parse_since, summarize, EntryFilter, EntryQuery, EntryStreamExt, JournalStats, SinceFilter,
    TagFilter, TextSearch,
};
pub use service::journal_service::JournalService;
pub use store::{
    append, append_entry, read_all, Entries, EntryStore, JsonlStore, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
