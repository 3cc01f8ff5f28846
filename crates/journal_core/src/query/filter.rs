//! Tag and date-range predicates.
//!
//! # Invariants
//! - Tag matching is exact and case-sensitive.
//! - Date boundaries always sit at the start of a day; comparison is on
//!   absolute instants, so entries written under different offsets compare
//!   correctly.

use super::EntryFilter;
use crate::model::entry::{Entry, ValidationError};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};

/// Passes entries that carry one exact tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    tag: String,
}

impl TagFilter {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl EntryFilter for TagFilter {
    fn matches(&self, entry: &Entry) -> bool {
        entry.has_tag(&self.tag)
    }
}

/// Passes entries with `timestamp >= boundary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinceFilter {
    boundary: DateTime<FixedOffset>,
}

impl SinceFilter {
    /// Boundary at midnight UTC of `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            boundary: date.and_time(NaiveTime::MIN).and_utc().fixed_offset(),
        }
    }

    /// Boundary at the start of `timestamp`'s day, in its own offset.
    pub fn from_timestamp(timestamp: DateTime<FixedOffset>) -> Self {
        let offset = *timestamp.offset();
        let midnight = timestamp.date_naive().and_time(NaiveTime::MIN);
        // Fixed offsets have no gaps or folds, so the mapping is always single.
        let boundary = offset
            .from_local_datetime(&midnight)
            .single()
            .unwrap_or(timestamp);
        Self { boundary }
    }

    pub fn boundary(&self) -> DateTime<FixedOffset> {
        self.boundary
    }
}

impl EntryFilter for SinceFilter {
    fn matches(&self, entry: &Entry) -> bool {
        entry.timestamp >= self.boundary
    }
}

/// Parses a `--since` value.
///
/// Accepts `YYYY-MM-DD` (start of day, UTC) or a full RFC 3339 timestamp
/// (start of its day in its own offset).
///
/// # Errors
/// - [`ValidationError::InvalidDate`] for anything else.
pub fn parse_since(raw: &str) -> Result<SinceFilter, ValidationError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(SinceFilter::from_date(date));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(SinceFilter::from_timestamp)
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}
