//! ldlog Logs - Log path validation, clearing, reading, and local-time formatting

mod eraser;
mod path;
mod reader;
pub mod timestamp;
mod timezone;
mod writer;

pub use eraser::LogFileEraser;
pub use path::{PathValidator, ValidatedPath};
pub use reader::LogReader;
pub use timestamp::{
    convert_to_local, extract_utc_timestamp, format_lines_with_local_time, format_local_timestamp,
};
pub use timezone::{offset_to_zone, resolve_timezone};
pub use writer::{CaptureOutcome, ErrorLogWriter};

use ldlog_core::{constants, Result, SiteSettings};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the log lives: `<root>/logs/debug.log`
#[derive(Debug, Clone)]
pub struct LogLocation {
    root: PathBuf,
}

impl LogLocation {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Location under the default ldlog home
    pub fn default_home() -> Self {
        Self::new(constants::ldlog_home())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The only directory log operations may touch
    pub fn logs_dir(&self) -> PathBuf {
        constants::logs_dir(&self.root)
    }

    pub fn log_path(&self) -> PathBuf {
        constants::log_path(&self.root)
    }

    /// Ensure the log directory exists
    pub fn ensure_log_dir(&self) -> Result<()> {
        let dir = self.logs_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
            debug!("Created log directory {}", dir.display());
        }
        Ok(())
    }

    pub fn validator(&self) -> PathValidator {
        PathValidator::new(self.logs_dir())
    }

    pub fn eraser(&self) -> LogFileEraser {
        LogFileEraser::new(self.validator(), self.log_path())
    }

    pub fn reader(&self) -> LogReader {
        LogReader::new(self.log_path())
    }

    pub fn writer(&self) -> ErrorLogWriter {
        ErrorLogWriter::new(self.log_path())
    }
}

/// Read the log and tag every timestamped line with the site's local time,
/// in the configured display order
pub fn get_formatted_log(location: &LogLocation, settings: &SiteSettings) -> Vec<String> {
    let timezone = resolve_timezone(settings);
    let lines = location.reader().read_lines();
    let formatted = format_lines_with_local_time(&lines, &timezone);
    settings.log_order.apply(formatted)
}
