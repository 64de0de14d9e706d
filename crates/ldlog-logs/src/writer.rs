//! Error-log writer
//!
//! Appends entries in the format PHP's `error_log()` uses, so captured output
//! and PHP output share one file and one timestamp convention.

use chrono::{DateTime, Utc};
use fs2::FileExt;
use ldlog_core::{Error, Result, SiteSettings};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::timestamp::ERROR_LOG_TIME_FORMAT;

/// Result of a capture attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Entries appended to the log
    Written { entries: usize },
    /// Capture is disabled by settings
    Skipped,
}

/// Appends timestamped entries to the log file
pub struct ErrorLogWriter {
    path: PathBuf,
}

impl ErrorLogWriter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append a message if capture is enabled in `settings`
    pub fn capture(&self, settings: &SiteSettings, message: &str) -> Result<CaptureOutcome> {
        if !settings.capture_enabled() {
            debug!("Capture disabled, dropping message");
            return Ok(CaptureOutcome::Skipped);
        }
        let entries = self.append(message)?;
        Ok(CaptureOutcome::Written { entries })
    }

    /// Append a message stamped with the current time
    pub fn append(&self, message: &str) -> Result<usize> {
        self.append_at(message, Utc::now())
    }

    /// Append a message stamped with `at`. Every non-blank line of the
    /// message becomes its own entry. Returns the number of entries written.
    pub fn append_at(&self, message: &str, at: DateTime<Utc>) -> Result<usize> {
        let entries: String = message
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| format_entry(at, line))
            .collect();

        if entries.is_empty() {
            return Ok(0);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        FileExt::try_lock_exclusive(&file).map_err(|_| Error::LockUnavailable(self.path.clone()))?;
        let written = file.write_all(entries.as_bytes()).and_then(|_| file.flush());
        let _ = FileExt::unlock(&file);
        written?;

        let count = entries.matches('\n').count();
        debug!("Appended {} entr(ies) to {}", count, self.path.display());
        Ok(count)
    }

    /// Get the log file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Format one log entry, e.g. `[06-Aug-2025 06:30:45 UTC] message\n`
pub fn format_entry(at: DateTime<Utc>, line: &str) -> String {
    format!("[{} UTC] {}\n", at.format(ERROR_LOG_TIME_FORMAT), line)
}
