use chrono::DateTime;
use journal_core::{
    append_entry, parse_since, read_all, Entry, EntryQuery, EntryStreamExt, JournalConfig,
    JournalService, TextSearch,
};
use std::path::Path;

fn entry_at(ts: &str, text: &str, tags: &[&str]) -> Entry {
    Entry::with_timestamp(DateTime::parse_from_rfc3339(ts).unwrap(), text, tags).unwrap()
}

fn seed(path: &Path, entries: &[Entry]) {
    for entry in entries {
        append_entry(path, entry).unwrap();
    }
}

fn texts<I>(items: I) -> Vec<String>
where
    I: Iterator<Item = journal_core::StoreResult<Entry>>,
{
    items.map(|item| item.unwrap().text).collect()
}

#[test]
fn tag_filter_selects_only_tagged_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");
    seed(
        &path,
        &[
            entry_at("2024-01-01T09:00:00Z", "standup", &["work"]),
            entry_at("2024-01-01T18:00:00Z", "dinner", &["home"]),
            entry_at("2024-01-01T22:00:00Z", "read", &[]),
            entry_at("2024-01-02T09:00:00Z", "review", &["home", "work"]),
        ],
    );

    assert_eq!(texts(read_all(&path).tagged("work")), vec!["standup", "review"]);
    assert!(texts(read_all(&path).tagged("Work")).is_empty());
}

#[test]
fn search_is_case_insensitive_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");
    seed(
        &path,
        &[entry_at("2024-01-01T09:00:00Z", "Fixed login BUG", &[])],
    );

    assert_eq!(
        texts(read_all(&path).search(TextSearch::insensitive("bug"))),
        vec!["Fixed login BUG"]
    );
    assert!(texts(read_all(&path).search(TextSearch::new("bug", true))).is_empty());
    assert_eq!(
        texts(read_all(&path).search(TextSearch::new("BUG", true))),
        vec!["Fixed login BUG"]
    );
}

#[test]
fn add_then_search_returns_only_matching_entry() {
    let dir = tempfile::tempdir().unwrap();
    let service = JournalService::open(&JournalConfig::new(dir.path().join("journal.jsonl")));

    service.add("Started learning", &[] as &[&str]).unwrap();
    let second = service.add("Fixed login bug", &["work"]).unwrap();

    let hits = service.search(TextSearch::insensitive("bug")).unwrap();
    assert_eq!(hits, vec![second]);
}

#[test]
fn since_filter_composes_with_tag_filter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");
    seed(
        &path,
        &[
            entry_at("2024-01-31T23:00:00Z", "old work", &["work"]),
            entry_at("2024-02-01T00:00:00Z", "new work", &["work"]),
            entry_at("2024-02-03T12:00:00Z", "new home", &["home"]),
        ],
    );

    let since = parse_since("2024-02-01").unwrap();
    assert_eq!(
        texts(read_all(&path).since(since).tagged("work")),
        vec!["new work"]
    );

    let query = EntryQuery::new().with_since(since).with_limit(1);
    assert_eq!(texts(query.apply(read_all(&path))), vec!["new work"]);
}

#[test]
fn stats_cover_days_tags_and_untagged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");
    seed(
        &path,
        &[
            entry_at("2024-01-01T09:00:00+01:00", "a", &["work"]),
            entry_at("2024-01-01T10:00:00+01:00", "b", &["work", "urgent"]),
            entry_at("2024-01-02T10:00:00+01:00", "c", &[]),
        ],
    );
    let service = JournalService::open(&JournalConfig::new(&path));

    let stats = service.stats().unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.untagged, 1);
    assert_eq!(stats.by_day.len(), 2);
    assert_eq!(stats.tags_by_frequency(), vec![("work", 2), ("urgent", 1)]);
}

#[test]
fn empty_store_gives_empty_results() {
    let dir = tempfile::tempdir().unwrap();
    let service = JournalService::open(&JournalConfig::new(dir.path().join("missing.jsonl")));

    assert_eq!(service.entries().count(), 0);
    assert!(service.search(TextSearch::insensitive("x")).unwrap().is_empty());
    let stats = service.stats().unwrap();
    assert_eq!(stats.total, 0);
    assert!(stats.by_tag.is_empty());
    assert_eq!(service.export_markdown().unwrap(), "# Journal Export\n");
}

#[test]
fn unicode_text_round_trips_and_searches() {
    let dir = tempfile::tempdir().unwrap();
    let service = JournalService::open(&JournalConfig::new(dir.path().join("journal.jsonl")));

    let created = service.add("Café ÜBER alles 🎉", &["früh"]).unwrap();

    let replayed = service
        .query(EntryQuery::new().with_tag("früh"))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(replayed, vec![created.clone()]);
    assert_eq!(
        service.search(TextSearch::insensitive("über")).unwrap(),
        vec![created]
    );
}

#[test]
fn export_renders_entries_in_append_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");
    seed(
        &path,
        &[
            entry_at("2024-05-01T07:30:00+00:00", "sunrise", &[]),
            entry_at("2024-05-01T21:15:00+00:00", "stars", &["sky"]),
        ],
    );

    let markdown = JournalService::open(&JournalConfig::new(&path))
        .export_markdown()
        .unwrap();
    assert_eq!(
        markdown,
        "# Journal Export\n\n## 2024-05-01\n\n- **07:30** — sunrise\n- **21:15** — stars\n  - *Tags: sky*\n"
    );
}
