//! Single-pass journal statistics.
//!
//! # Invariants
//! - Day buckets use each entry's own local date (its stored offset).
//! - An entry with N tags lands in N tag buckets.
//! - Untagged entries are excluded from tag buckets and counted in
//!   `untagged`, so `untagged + entries with tags == total`.
//! - Bucket maps iterate in ascending key order.

use crate::model::entry::Entry;
use crate::store::StoreResult;
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::collections::BTreeMap;

/// Aggregated journal summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalStats {
    pub total: usize,
    pub by_day: BTreeMap<NaiveDate, usize>,
    pub by_tag: BTreeMap<String, usize>,
    pub untagged: usize,
    pub earliest: Option<DateTime<FixedOffset>>,
    pub latest: Option<DateTime<FixedOffset>>,
}

impl JournalStats {
    /// Folds one entry into the summary.
    pub fn record(&mut self, entry: &Entry) {
        self.total += 1;
        *self.by_day.entry(entry.local_date()).or_insert(0) += 1;

        if entry.tags.is_empty() {
            self.untagged += 1;
        }
        for tag in &entry.tags {
            *self.by_tag.entry(tag.clone()).or_insert(0) += 1;
        }

        if self.earliest.map_or(true, |ts| entry.timestamp < ts) {
            self.earliest = Some(entry.timestamp);
        }
        if self.latest.map_or(true, |ts| entry.timestamp > ts) {
            self.latest = Some(entry.timestamp);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Local dates of the earliest and latest entries.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.earliest, self.latest) {
            (Some(first), Some(last)) => Some((first.date_naive(), last.date_naive())),
            _ => None,
        }
    }

    /// Tags ordered by count descending, then name ascending.
    pub fn tags_by_frequency(&self) -> Vec<(&str, usize)> {
        let mut tags = self
            .by_tag
            .iter()
            .map(|(tag, count)| (tag.as_str(), *count))
            .collect::<Vec<_>>();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        tags
    }
}

/// Reduces an entry stream into [`JournalStats`].
///
/// # Errors
/// Returns the first store error in the stream.
pub fn summarize<I>(entries: I) -> StoreResult<JournalStats>
where
    I: IntoIterator<Item = StoreResult<Entry>>,
{
    let mut stats = JournalStats::default();
    for entry in entries {
        stats.record(&entry?);
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::{summarize, JournalStats};
    use crate::model::entry::Entry;
    use chrono::{DateTime, NaiveDate};

    fn entry(ts: &str, tags: &[&str]) -> Entry {
        Entry::with_timestamp(DateTime::parse_from_rfc3339(ts).unwrap(), "text", tags).unwrap()
    }

    #[test]
    fn empty_stream_gives_zero_stats() {
        let stats = summarize(Vec::new()).unwrap();
        assert_eq!(stats, JournalStats::default());
        assert!(stats.is_empty());
        assert_eq!(stats.date_range(), None);
    }

    #[test]
    fn counts_days_tags_and_untagged() {
        let entries = vec![
            entry("2024-01-02T23:30:00-05:00", &["work", "urgent"]),
            entry("2024-01-01T08:00:00+00:00", &["work"]),
            entry("2024-01-03T05:30:00+00:00", &[]),
        ];
        let stats = summarize(entries.into_iter().map(Ok)).unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.untagged, 1);
        assert_eq!(stats.by_tag["work"], 2);
        assert_eq!(stats.by_tag["urgent"], 1);

        // 23:30 at -05:00 still belongs to its own local day.
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        assert_eq!(
            stats.by_day.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
            vec![(day(1), 1), (day(2), 1), (day(3), 1)]
        );
        assert_eq!(stats.date_range(), Some((day(1), day(3))));
    }

    #[test]
    fn tags_by_frequency_breaks_ties_by_name() {
        let entries = vec![
            entry("2024-01-01T08:00:00Z", &["b", "a"]),
            entry("2024-01-01T09:00:00Z", &["c"]),
            entry("2024-01-01T10:00:00Z", &["c"]),
        ];
        let stats = summarize(entries.into_iter().map(Ok)).unwrap();
        assert_eq!(stats.tags_by_frequency(), vec![("c", 2), ("a", 1), ("b", 1)]);
    }
}
