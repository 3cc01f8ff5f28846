//! Sequential replay of the JSONL journal.
//!
//! # Responsibility
//! - Produce a lazy, forward-only stream of decoded entries.
//! - Isolate corrupt lines so one bad record never aborts a scan.
//!
//! # Invariants
//! - Every call to [`read_all`] starts a fresh scan from byte zero.
//! - The file handle lives inside [`Entries`] and is released when the scan
//!   finishes, fails, or the iterator is dropped early.
//! - After an I/O error is yielded the stream is exhausted.

use super::{StoreError, StoreResult};
use crate::model::entry::{decode, Entry};
use log::{debug, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

/// Opens the journal for a new scan.
///
/// A missing journal yields an empty stream. Other open failures are
/// yielded as the first and only item.
pub fn read_all(path: impl AsRef<Path>) -> Entries {
    let path = path.as_ref().to_path_buf();
    let state = match File::open(&path) {
        Ok(file) => ScanState::Open(BufReader::new(file)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(
                "event=journal_scan module=store status=ok path={} lines=0 skipped=0 reason=missing",
                path.display()
            );
            ScanState::Done
        }
        Err(err) => ScanState::Failed(StoreError::io(&path, err)),
    };

    Entries {
        path,
        state,
        buf: Vec::new(),
        line_number: 0,
        skipped: 0,
    }
}

enum ScanState {
    Open(BufReader<File>),
    Failed(StoreError),
    Done,
}

/// Lazy entry stream over one journal file.
///
/// Finite and not restartable; call [`read_all`] again for a new pass.
pub struct Entries {
    path: PathBuf,
    state: ScanState,
    buf: Vec<u8>,
    line_number: usize,
    skipped: usize,
}

impl Entries {
    /// Journal path this stream reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of lines skipped as undecodable so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn finish(&mut self) {
        self.state = ScanState::Done;
        debug!(
            "event=journal_scan module=store status=ok path={} lines={} skipped={}",
            self.path.display(),
            self.line_number,
            self.skipped
        );
    }

    fn decode_current_line(&mut self) -> Option<Entry> {
        let line = match std::str::from_utf8(&self.buf) {
            Ok(line) => line.trim(),
            Err(err) => {
                self.skipped += 1;
                warn!(
                    "event=entry_decode module=store status=skipped path={} line={} error=invalid_utf8:{}",
                    self.path.display(),
                    self.line_number,
                    err
                );
                return None;
            }
        };
        if line.is_empty() {
            return None;
        }

        match decode(line) {
            Ok(entry) => Some(entry),
            Err(err) => {
                self.skipped += 1;
                warn!(
                    "event=entry_decode module=store status=skipped path={} line={} error={}",
                    self.path.display(),
                    self.line_number,
                    err
                );
                None
            }
        }
    }
}

impl Iterator for Entries {
    type Item = StoreResult<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if matches!(self.state, ScanState::Failed(_)) {
                if let ScanState::Failed(err) = std::mem::replace(&mut self.state, ScanState::Done)
                {
                    return Some(Err(err));
                }
            }
            let ScanState::Open(reader) = &mut self.state else {
                return None;
            };

            self.buf.clear();
            match reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.finish();
                    return None;
                }
                Ok(_) => {
                    self.line_number += 1;
                    if let Some(entry) = self.decode_current_line() {
                        return Some(Ok(entry));
                    }
                }
                Err(err) => {
                    self.state = ScanState::Done;
                    warn!(
                        "event=journal_scan module=store status=error path={} line={} error={}",
                        self.path.display(),
                        self.line_number + 1,
                        err
                    );
                    return Some(Err(StoreError::io(&self.path, err)));
                }
            }
        }
    }
}

impl FusedIterator for Entries {}
