//! Append path for the JSONL journal.
//!
//! # Responsibility
//! - Turn caller input into a timestamped entry and append it as one line.
//!
//! # Invariants
//! - Validation happens before the file is touched.
//! - A record always starts on a fresh line, even after a torn tail.
//! - The encoded line and its newline go out in one append-mode write.
//! - A failed write or sync truncates the file back to its prior length.
//! - Data is synced to the medium before `append` returns.

use super::{StoreError, StoreResult};
use crate::model::entry::{encode, Entry};
use log::{error, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::time::Instant;

/// Creates an entry stamped with the current local time and appends it.
///
/// Missing parent directories and the journal file itself are created.
/// Returns the created entry for confirmation output.
///
/// # Errors
/// - [`StoreError::Validation`] for blank text or tags (no I/O performed).
/// - [`StoreError::Io`] when the journal cannot be created or written.
pub fn append<S: AsRef<str>>(
    path: impl AsRef<Path>,
    text: &str,
    tags: &[S],
) -> StoreResult<Entry> {
    let entry = Entry::new(text, tags)?;
    append_entry(path, &entry)?;
    Ok(entry)
}

/// Appends an already-built entry, keeping its timestamp.
///
/// # Errors
/// - [`StoreError::Validation`] when the entry would not decode back (no I/O performed).
/// - [`StoreError::Io`] when the journal cannot be created or written.
pub fn append_entry(path: impl AsRef<Path>, entry: &Entry) -> StoreResult<()> {
    entry.validate()?;
    let path = path.as_ref();
    let started_at = Instant::now();

    match write_line(path, entry) {
        Ok(bytes) => {
            info!(
                "event=entry_append module=store status=ok path={} bytes={} tags={} duration_ms={}",
                path.display(),
                bytes,
                entry.tags.len(),
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=entry_append module=store status=error path={} duration_ms={} error={}",
                path.display(),
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn write_line(path: &Path, entry: &Entry) -> StoreResult<usize> {
    let mut line = encode(entry).map_err(StoreError::Encode)?;
    line.push('\n');

    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .map_err(|err| StoreError::io(path, err))?;
    let start_len = file.metadata().map_err(|err| StoreError::io(path, err))?.len();

    if !ends_with_newline(&mut file, start_len).map_err(|err| StoreError::io(path, err))? {
        warn!(
            "event=entry_append module=store status=repaired path={} reason=torn_tail",
            path.display()
        );
        line.insert(0, '\n');
    }

    let written = file.write_all(line.as_bytes()).and_then(|()| file.sync_data());
    if let Err(err) = written {
        rollback(&file, path, start_len);
        return Err(StoreError::io(path, err));
    }

    Ok(line.len())
}

/// Empty files count as terminated.
fn ends_with_newline(file: &mut File, len: u64) -> io::Result<bool> {
    if len == 0 {
        return Ok(true);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn rollback(file: &File, path: &Path, len: u64) {
    if let Err(err) = file.set_len(len).and_then(|()| file.sync_data()) {
        error!(
            "event=entry_append_rollback module=store status=error path={} len={} error={}",
            path.display(),
            len,
            err
        );
    }
}
