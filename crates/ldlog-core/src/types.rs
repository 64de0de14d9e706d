//! Core types for ldlog

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Reason a log deletion did not happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteFailure {
    /// Target path failed validation
    Validate,
    /// Caller lacks the manage capability
    Permission,
    /// Anti-CSRF token check failed
    Nonce,
    /// Fallback open of the file failed
    OpenFailed,
    /// Exclusive lock could not be acquired
    LockFailed,
    /// Primary write succeeded but the file still has content
    NotEmptyAfterClear,
    /// Fallback truncate succeeded but the file still has content
    NotEmptyAfterTruncate,
    /// Unexpected I/O failure caught at the boundary
    Exception,
}

impl DeleteFailure {
    /// Stable reason code
    pub fn code(&self) -> &'static str {
        match self {
            DeleteFailure::Validate => "validate",
            DeleteFailure::Permission => "permission",
            DeleteFailure::Nonce => "nonce",
            DeleteFailure::OpenFailed => "fopen failed",
            DeleteFailure::LockFailed => "flock failed",
            DeleteFailure::NotEmptyAfterClear => "not empty after clear",
            DeleteFailure::NotEmptyAfterTruncate => "not empty after ftruncate",
            DeleteFailure::Exception => "exception",
        }
    }

    /// Human readable explanation shown in error notices
    pub fn describe(&self) -> &'static str {
        match self {
            DeleteFailure::Validate => "the log file path is not allowed",
            DeleteFailure::Permission => "you do not have permission to delete the log",
            DeleteFailure::Nonce => "the request could not be verified, please retry",
            DeleteFailure::OpenFailed => "the log file could not be opened",
            DeleteFailure::LockFailed => "the log file is locked by another process",
            DeleteFailure::NotEmptyAfterClear | DeleteFailure::NotEmptyAfterTruncate => {
                "the log file still has content after clearing"
            }
            DeleteFailure::Exception => "an unexpected error occurred",
        }
    }
}

impl fmt::Display for DeleteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for DeleteFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Outcome of a log deletion. A failure reason is present only when
/// `success` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletionResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<DeleteFailure>,
}

impl DeletionResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(reason: DeleteFailure) -> Self {
        Self {
            success: false,
            message: Some(reason),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn failure(&self) -> Option<DeleteFailure> {
        self.message
    }

    /// Reason code, if failed
    pub fn message(&self) -> Option<&'static str> {
        self.message.map(|m| m.code())
    }
}

impl From<std::result::Result<(), DeleteFailure>> for DeletionResult {
    fn from(result: std::result::Result<(), DeleteFailure>) -> Self {
        match result {
            Ok(()) => DeletionResult::ok(),
            Err(reason) => DeletionResult::failed(reason),
        }
    }
}

/// Display order of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOrder {
    #[default]
    Oldest,
    Newest,
}

impl LogOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOrder::Oldest => "oldest",
            LogOrder::Newest => "newest",
        }
    }

    /// Put lines (given oldest first) into this order
    pub fn apply(&self, mut lines: Vec<String>) -> Vec<String> {
        if *self == LogOrder::Newest {
            lines.reverse();
        }
        lines
    }
}

impl FromStr for LogOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "oldest" | "asc" => Ok(LogOrder::Oldest),
            "newest" | "desc" => Ok(LogOrder::Newest),
            other => Err(Error::config(format!(
                "Invalid log order '{}'. Expected 'oldest' or 'newest'",
                other
            ))),
        }
    }
}

impl fmt::Display for LogOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of a notice shown above the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// One-shot message rendered above the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new<S: Into<String>>(level: NoticeLevel, text: S) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    /// Notice reporting the outcome of a delete request
    pub fn for_deletion(result: &DeletionResult) -> Self {
        match result.failure() {
            None => Notice::new(NoticeLevel::Success, "Log file cleared"),
            Some(reason) => Notice::new(
                NoticeLevel::Error,
                format!("Failed to clear log file: {} ({})", reason.describe(), reason.code()),
            ),
        }
    }
}
