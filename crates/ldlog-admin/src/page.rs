//! Page model for the log screen

use ldlog_core::constants::{LARGE_LOG_THRESHOLD, MANAGE_CAPABILITY};
use ldlog_core::{DeletionResult, Notice, NoticeLevel, SiteSettings};
use ldlog_logs::{get_formatted_log, LogLocation};
use serde::Serialize;

use crate::Authorizer;

/// Everything the log screen renders
#[derive(Debug, Clone, Serialize)]
pub struct LogPage {
    pub authorized: bool,
    pub notices: Vec<Notice>,
    pub lines: Vec<String>,
    pub file_exists: bool,
    pub size_bytes: u64,
}

impl LogPage {
    /// Build the page. `last_result` is the outcome of a delete request
    /// handled earlier in the same request cycle, if any.
    pub fn build(
        location: &LogLocation,
        settings: &SiteSettings,
        last_result: Option<&DeletionResult>,
        authorizer: &dyn Authorizer,
    ) -> Self {
        if !authorizer.can(MANAGE_CAPABILITY) {
            return Self {
                authorized: false,
                notices: vec![Notice::new(
                    NoticeLevel::Error,
                    "You do not have sufficient permissions to view the debug log",
                )],
                lines: Vec::new(),
                file_exists: false,
                size_bytes: 0,
            };
        }

        let mut notices = Vec::new();
        if let Some(result) = last_result {
            notices.push(Notice::for_deletion(result));
        }

        let reader = location.reader();
        let file_exists = reader.exists();
        let size_bytes = reader.size();

        if !file_exists {
            notices.push(Notice::new(
                NoticeLevel::Info,
                format!("Log file not found: {}", location.log_path().display()),
            ));
        } else if size_bytes > LARGE_LOG_THRESHOLD {
            notices.push(Notice::new(
                NoticeLevel::Warning,
                format!(
                    "The log file is large ({} bytes). Consider clearing it",
                    size_bytes
                ),
            ));
        }

        Self {
            authorized: true,
            notices,
            lines: get_formatted_log(location, settings),
            file_exists,
            size_bytes,
        }
    }

    pub fn is_large(&self) -> bool {
        self.size_bytes > LARGE_LOG_THRESHOLD
    }
}
