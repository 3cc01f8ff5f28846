//! Markdown rendering of entry streams.
//!
//! # Responsibility
//! - Render entries as a dated Markdown document, in received order.
//!
//! # Invariants
//! - A `## YYYY-MM-DD` heading is emitted whenever the local date changes
//!   from the previous entry, so out-of-order streams repeat headings.
//! - Multi-line entry text stays inside its list item.

use crate::model::entry::Entry;
use crate::store::StoreResult;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

const EXPORT_TITLE: &str = "# Journal Export";

static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("valid line break regex"));

/// Incremental Markdown writer.
#[derive(Debug)]
pub struct MarkdownExporter {
    out: String,
    current_date: Option<NaiveDate>,
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownExporter {
    pub fn new() -> Self {
        let mut out = String::from(EXPORT_TITLE);
        out.push('\n');
        Self {
            out,
            current_date: None,
        }
    }

    /// Appends one entry, opening a new day section when needed.
    pub fn push(&mut self, entry: &Entry) {
        let date = entry.local_date();
        if self.current_date != Some(date) {
            self.current_date = Some(date);
            self.out
                .push_str(&format!("\n## {}\n\n", date.format("%Y-%m-%d")));
        }

        let text = LINE_BREAK_RE.replace_all(&entry.text, "\n  ");
        self.out.push_str(&format!(
            "- **{}** — {}\n",
            entry.timestamp.format("%H:%M"),
            text
        ));
        if !entry.tags.is_empty() {
            self.out
                .push_str(&format!("  - *Tags: {}*\n", entry.tags.join(", ")));
        }
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Renders already-loaded entries.
pub fn render_markdown<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut exporter = MarkdownExporter::new();
    for entry in entries {
        exporter.push(entry);
    }
    exporter.finish()
}

/// Consumes an entry stream and renders it.
///
/// # Errors
/// Returns the first store error in the stream.
pub fn export_markdown<I>(entries: I) -> StoreResult<String>
where
    I: IntoIterator<Item = StoreResult<Entry>>,
{
    let mut exporter = MarkdownExporter::new();
    for entry in entries {
        exporter.push(&entry?);
    }
    Ok(exporter.finish())
}
