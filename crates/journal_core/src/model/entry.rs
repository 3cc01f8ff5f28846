//! Journal entry model and line codec.
//!
//! # Responsibility
//! - Define the canonical record persisted as one JSONL line.
//! - Encode/decode entries to and from a single line of text.
//! - Validate entry text and normalize tags before anything is written.
//!
//! # Invariants
//! - `text` is never blank.
//! - `timestamp` always carries a UTC offset.
//! - Encoded lines never contain a raw newline; `tags` is omitted when empty.
//! - `decode(encode(entry)) == entry` for every valid entry.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, SecondsFormat, SubsecRound};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation errors raised before any store I/O happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Entry text is empty or whitespace-only.
    EmptyText,
    /// Tag at `index` is empty or whitespace-only.
    BlankTag { index: usize },
    /// Date filter input is neither `YYYY-MM-DD` nor RFC 3339.
    InvalidDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "entry text cannot be empty"),
            Self::BlankTag { index } => write!(f, "tag #{} cannot be blank", index + 1),
            Self::InvalidDate(value) => write!(
                f,
                "invalid date format `{value}`; expected YYYY-MM-DD or an RFC 3339 timestamp"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Per-line decode failure.
///
/// The sequential reader skips lines that fail with this error.
#[derive(Debug)]
pub enum DecodeError {
    /// Line is not a JSON object of the expected shape.
    Malformed(serde_json::Error),
    /// `timestamp` is not a timezone-aware RFC 3339 value.
    InvalidTimestamp { value: String, message: String },
    /// Fields parsed but violate entry invariants.
    Invalid(ValidationError),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed entry record: {err}"),
            Self::InvalidTimestamp { value, message } => {
                write!(f, "invalid entry timestamp `{value}`: {message}")
            }
            Self::Invalid(err) => write!(f, "invalid entry record: {err}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::InvalidTimestamp { .. } => None,
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

impl From<ValidationError> for DecodeError {
    fn from(value: ValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// One journal entry.
///
/// Entries have no identity besides their line position in the journal.
/// Serialization goes through the on-disk record shape, so embedding an
/// `Entry` in other JSON documents applies the same validation as [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord", into = "EntryRecord")]
pub struct Entry {
    /// Creation time with the writer's UTC offset.
    pub timestamp: DateTime<FixedOffset>,
    /// Free-form body. Serialized as `entry`.
    pub text: String,
    /// Ordered labels, possibly empty.
    pub tags: Vec<String>,
}

impl Entry {
    /// Creates an entry stamped with the current local time (whole seconds).
    ///
    /// # Errors
    /// - [`ValidationError::EmptyText`] for blank text.
    /// - [`ValidationError::BlankTag`] for blank tags.
    pub fn new<S: AsRef<str>>(
        text: impl Into<String>,
        tags: &[S],
    ) -> Result<Self, ValidationError> {
        let now = Local::now().fixed_offset().trunc_subsecs(0);
        Self::with_timestamp(now, text, tags)
    }

    /// Creates an entry with a caller-provided timestamp.
    ///
    /// Used by import and test paths where the creation time already exists.
    pub fn with_timestamp<S: AsRef<str>>(
        timestamp: DateTime<FixedOffset>,
        text: impl Into<String>,
        tags: &[S],
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        validate_text(&text)?;
        Ok(Self {
            timestamp,
            text,
            tags: normalize_tags(tags)?,
        })
    }

    /// Checks the invariants a writer relies on: non-blank text and tags.
    ///
    /// Fields are public, so entries built by hand must pass this before
    /// they are persisted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_text(&self.text)?;
        match self.tags.iter().position(|tag| tag.trim().is_empty()) {
            Some(index) => Err(ValidationError::BlankTag { index }),
            None => Ok(()),
        }
    }

    /// Returns whether `tag` is one of this entry's tags (case-sensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }

    /// Calendar date in the entry's own offset.
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Wire shape of one JSONL line.
#[derive(Debug, Serialize, Deserialize)]
struct EntryRecord {
    timestamp: String,
    entry: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

impl From<Entry> for EntryRecord {
    fn from(value: Entry) -> Self {
        Self {
            timestamp: format_timestamp(&value.timestamp),
            entry: value.text,
            tags: value.tags,
        }
    }
}

impl TryFrom<EntryRecord> for Entry {
    type Error = DecodeError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let timestamp = DateTime::parse_from_rfc3339(record.timestamp.trim()).map_err(|err| {
            DecodeError::InvalidTimestamp {
                value: record.timestamp.clone(),
                message: err.to_string(),
            }
        })?;
        validate_text(&record.entry)?;

        // Stored tags are kept verbatim; normalization only applies on creation.
        Ok(Self {
            timestamp,
            text: record.entry,
            tags: record.tags,
        })
    }
}

/// Encodes one entry as a single JSON line without the trailing newline.
///
/// # Errors
/// Returns the serializer error; with string-only fields this does not
/// happen in practice.
pub fn encode(entry: &Entry) -> serde_json::Result<String> {
    serde_json::to_string(&EntryRecord::from(entry.clone()))
}

/// Decodes one non-blank journal line.
pub fn decode(line: &str) -> Result<Entry, DecodeError> {
    let record: EntryRecord = serde_json::from_str(line)?;
    Entry::try_from(record)
}

/// Formats a timestamp as RFC 3339 with offset and the shortest exact
/// fractional-second form.
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Trims tags, rejects blank ones, and drops repeats (first occurrence wins).
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Result<Vec<String>, ValidationError> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(tags.len());
    for (index, tag) in tags.iter().enumerate() {
        let trimmed = tag.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::BlankTag { index });
        }
        if seen.insert(trimmed) {
            normalized.push(trimmed.to_string());
        }
    }
    Ok(normalized)
}

/// Splits a comma-separated tag list, ignoring empty segments.
///
/// `"work, coding,"` becomes `["work", "coding"]`.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(())
}
