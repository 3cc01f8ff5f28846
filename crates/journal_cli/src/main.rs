//! `journal` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, resolve the journal path, and render core results.
//! - Keep all journal semantics inside `journal_core`.
//!
//! # Invariants
//! - A missing journal is an empty journal (exit 0).
//! - Validation and I/O failures exit non-zero with a message on stderr.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use journal_core::{
    format_timestamp, init_logging, parse_since, parse_tag_list, Entry, EntryQuery, JournalConfig,
    JournalService, JournalStats, TextSearch, DEFAULT_STORE_FILE,
};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "journal")]
#[command(version = journal_core::core_version())]
#[command(about = "Append-only CLI journal with JSONL persistence")]
#[command(after_help = "Examples:
  journal add \"Had a great day\"
  journal add \"Fixed bug\" --tags work,coding
  journal replay --since 2024-01-01
  journal search \"coffee\"
  journal count
  journal export --format markdown > journal.md")]
struct Cli {
    /// Path to the journal file
    #[arg(short, long, global = true, env = "JOURNAL_LOG", default_value = DEFAULT_STORE_FILE)]
    log: PathBuf,

    /// Diagnostics level (trace|debug|info|warn|error|off)
    #[arg(long, global = true, env = "JOURNAL_DIAG_LEVEL", default_value = "warn")]
    diag_level: String,

    /// Write diagnostics to rolling files in this directory instead of stderr
    #[arg(long, global = true, env = "JOURNAL_DIAG_DIR")]
    diag_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a new journal entry
    Add {
        /// The journal entry text
        text: String,
        /// Comma-separated tags (e.g. work,important)
        #[arg(short, long)]
        tags: Option<String>,
    },

    /// Display journal entries
    Replay {
        /// Show entries from this date onward (YYYY-MM-DD or RFC 3339)
        #[arg(short, long)]
        since: Option<String>,
        /// Filter by tag (exact match)
        #[arg(long)]
        tag: Option<String>,
        /// Stop after this many entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Search entries
    Search {
        /// Text to search for
        keyword: String,
        /// Make search case-sensitive
        #[arg(short, long)]
        case_sensitive: bool,
    },

    /// Show journal statistics
    Count,

    /// Export to other formats
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Markdown)]
        format: ExportFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ExportFormat {
    Markdown,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(message) = init_logging(&cli.diag_level, cli.diag_dir.as_deref()) {
        eprintln!("Error: {message}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = JournalConfig::new(cli.log);
    let service = JournalService::open(&config);
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Add { text, tags } => {
            let tags = tags.as_deref().map(parse_tag_list).unwrap_or_default();
            let entry = service.add(&text, &tags).with_context(|| {
                format!("failed to add entry to {}", config.store_path.display())
            })?;
            writeln!(stdout, "✓ Entry added to {}", config.store_path.display())?;
            if !entry.tags.is_empty() {
                writeln!(stdout, "  Tags: {}", entry.tags.join(", "))?;
            }
        }
        Commands::Replay { since, tag, limit } => {
            let mut query = EntryQuery::new();
            if let Some(raw) = since {
                query = query.with_since(parse_since(&raw)?);
            }
            if let Some(tag) = tag {
                query = query.with_tag(tag);
            }
            if let Some(limit) = limit {
                query = query.with_limit(limit);
            }

            let mut shown = 0usize;
            for entry in service.query(query) {
                write_entry(&mut stdout, &entry?, true)?;
                shown += 1;
            }
            if shown == 0 {
                eprintln!("No entries match your filters.");
            }
        }
        Commands::Search {
            keyword,
            case_sensitive,
        } => {
            let hits = service.search(TextSearch::new(keyword, case_sensitive))?;
            for entry in &hits {
                write_entry(&mut stdout, entry, false)?;
            }
            writeln!(stdout, "\n─── Found {} matching entries ───", hits.len())?;
        }
        Commands::Count => {
            let stats = service.stats()?;
            write_stats(&mut stdout, &stats)?;
        }
        Commands::Export { format } => match format {
            ExportFormat::Markdown => {
                let markdown = service.export_markdown()?;
                stdout.write_all(markdown.as_bytes())?;
            }
        },
    }

    stdout.flush().map_err(|err| anyhow!("failed to flush output: {err}"))
}

fn write_entry(out: &mut impl Write, entry: &Entry, with_tags: bool) -> Result<()> {
    writeln!(out, "{} | {}", format_timestamp(&entry.timestamp), entry.text)?;
    if with_tags && !entry.tags.is_empty() {
        writeln!(out, "  └─ tags: {}", entry.tags.join(", "))?;
    }
    Ok(())
}

fn write_stats(out: &mut impl Write, stats: &JournalStats) -> Result<()> {
    writeln!(out, "📊 Journal Statistics")?;
    writeln!(out, "   Total entries: {}", stats.total)?;

    if let Some((first, last)) = stats.date_range() {
        writeln!(out, "   Date range: {first} to {last}")?;
    }

    if !stats.by_tag.is_empty() {
        writeln!(out, "   Tags used:")?;
        for (tag, count) in stats.tags_by_frequency() {
            writeln!(out, "      {tag}: {count}")?;
        }
    }
    if stats.untagged > 0 {
        writeln!(out, "   Untagged: {}", stats.untagged)?;
    }

    if !stats.by_day.is_empty() {
        writeln!(out, "   Entries per day:")?;
        for (day, count) in &stats.by_day {
            writeln!(out, "      {day}: {count}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn add_parses_tags_and_global_log_path() {
        let cli = Cli::try_parse_from([
            "journal", "add", "hello", "--tags", "a,b", "-l", "x.jsonl",
        ])
        .unwrap();
        assert_eq!(cli.log.to_str(), Some("x.jsonl"));
        match cli.command {
            Commands::Add { text, tags } => {
                assert_eq!(text, "hello");
                assert_eq!(tags.as_deref(), Some("a,b"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
