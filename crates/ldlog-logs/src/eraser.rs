//! Log clearing under an exclusive advisory lock

use fs2::FileExt;
use ldlog_core::{DeleteFailure, DeletionResult};
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::path::PathValidator;

/// Truncates the log file to zero bytes
///
/// The target is validated before anything touches the disk. Clearing first
/// tries a locked write of empty content; if that write fails it falls back
/// to open + lock + truncate. Locks are never waited for: a held lock is
/// reported as `flock failed`.
#[derive(Debug, Clone)]
pub struct LogFileEraser {
    validator: PathValidator,
    default_path: PathBuf,
}

impl LogFileEraser {
    pub fn new(validator: PathValidator, default_path: PathBuf) -> Self {
        Self {
            validator,
            default_path,
        }
    }

    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    /// Clear `path`, or the default log file when `None`
    pub fn erase(&self, path: Option<&str>) -> DeletionResult {
        let default = self.default_path.to_string_lossy();
        let candidate = path.unwrap_or(&default);

        match self.validator.validate(candidate) {
            Some(validated) => clear_file(validated.as_path()).into(),
            None => {
                warn!("Refusing to clear {:?}: outside the log directory", candidate);
                DeletionResult::failed(DeleteFailure::Validate)
            }
        }
    }

    /// Clear a path taken from untyped input. Non-string values fail
    /// validation; `None` clears the default log file.
    pub fn erase_value(&self, path: Option<&Value>) -> DeletionResult {
        match path {
            None => self.erase(None),
            Some(value) => match self.validator.validate_value(value) {
                Some(validated) => clear_file(validated.as_path()).into(),
                None => {
                    warn!("Refusing to clear {}: invalid log path", value);
                    DeletionResult::failed(DeleteFailure::Validate)
                }
            },
        }
    }
}

fn clear_file(path: &Path) -> Result<(), DeleteFailure> {
    match write_empty_locked(path) {
        Ok(()) => {
            verify_empty(path, DeleteFailure::NotEmptyAfterClear)?;
            info!("Cleared log file {}", path.display());
            Ok(())
        }
        Err(e) => {
            debug!("Locked write to {} failed ({}), falling back to truncate", path.display(), e);
            truncate_locked(path)?;
            info!("Cleared log file {} (truncate fallback)", path.display());
            Ok(())
        }
    }
}

/// Truncate to empty content while holding an exclusive lock
fn write_empty_locked(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().write(true).create(true).open(path)?;
    FileExt::try_lock_exclusive(&file)?;

    let written = file.set_len(0);

    let _ = FileExt::unlock(&file);
    written
}

fn truncate_locked(path: &Path) -> Result<(), DeleteFailure> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(path)
        .map_err(|e| {
            warn!("Failed to open {}: {}", path.display(), e);
            DeleteFailure::OpenFailed
        })?;

    if let Err(e) = FileExt::try_lock_exclusive(&file) {
        warn!("Failed to lock {}: {}", path.display(), e);
        return Err(DeleteFailure::LockFailed);
    }

    let truncated = truncate_and_sync(&file);
    let _ = FileExt::unlock(&file);
    drop(file);

    truncated.map_err(|e| {
        warn!("Failed to truncate {}: {}", path.display(), e);
        DeleteFailure::Exception
    })?;

    verify_empty(path, DeleteFailure::NotEmptyAfterTruncate)
}

fn truncate_and_sync(file: &File) -> std::io::Result<()> {
    file.set_len(0)?;
    file.sync_all()
}

fn verify_empty(path: &Path, reason: DeleteFailure) -> Result<(), DeleteFailure> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() == 0 => Ok(()),
        Ok(meta) => {
            warn!("{} still has {} byte(s) after clearing", path.display(), meta.len());
            Err(reason)
        }
        Err(e) => {
            warn!("Failed to stat {}: {}", path.display(), e);
            Err(DeleteFailure::Exception)
        }
    }
}
