//! Constants and default values for ldlog

use std::path::{Path, PathBuf};

/// Default ldlog home directory name
pub const LDLOG_DIR: &str = ".ldlog";

/// Environment variable overriding the ldlog root directory
pub const ROOT_ENV: &str = "LDLOG_ROOT";

/// Log directory name (the only directory log operations may touch)
pub const LOGS_DIR: &str = "logs";

/// Log file name inside the log directory
pub const LOG_FILE: &str = "debug.log";

/// Settings file names to search for (in priority order)
pub const SETTINGS_FILES: &[&str] = &["settings.toml", "settings.yaml", "settings.yml", "settings.json"];

/// Log size above which the log page shows a warning (1MB)
pub const LARGE_LOG_THRESHOLD: u64 = 1024 * 1024;

/// Option key: explicit timezone name (e.g. "Asia/Tokyo")
pub const OPT_TIMEZONE_STRING: &str = "timezone_string";

/// Option key: numeric UTC offset in hours
pub const OPT_GMT_OFFSET: &str = "gmt_offset";

/// Option key: capture log output even when debug is off
pub const OPT_FORCE_CAPTURE: &str = "ldl_force_capture";

/// Option key: display order of log lines
pub const OPT_LOG_ORDER: &str = "ldl_log_order";

/// Option key: debug mode flag
pub const OPT_DEBUG: &str = "ldl_debug";

/// Capability required for delete and settings actions
pub const MANAGE_CAPABILITY: &str = "manage_options";

/// Request field that triggers a delete
pub const DELETE_FIELD: &str = "ldl_delete_log";

/// Request field carrying an explicit log path for delete
pub const DELETE_PATH_FIELD: &str = "ldl_log_path";

/// Anti-CSRF action for log deletion
pub const DELETE_ACTION: &str = "ldl_delete_log_action";

/// Anti-CSRF token field for log deletion
pub const DELETE_NONCE_FIELD: &str = "ldl_delete_nonce";

/// Request field that triggers a settings save
pub const SAVE_SETTINGS_FIELD: &str = "ldl_save_settings";

/// Anti-CSRF action for settings save
pub const SETTINGS_ACTION: &str = "ldl_save_settings_action";

/// Anti-CSRF token field for settings save
pub const SETTINGS_NONCE_FIELD: &str = "ldl_settings_nonce";

/// Get the ldlog home directory
pub fn ldlog_home() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(LDLOG_DIR))
        .unwrap_or_else(|| PathBuf::from(LDLOG_DIR))
}

/// Get the logs directory under a root
pub fn logs_dir(root: &Path) -> PathBuf {
    root.join(LOGS_DIR)
}

/// Get the default log file path under a root
pub fn log_path(root: &Path) -> PathBuf {
    logs_dir(root).join(LOG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ldlog_home() {
        let home = ldlog_home();
        assert!(home.to_string_lossy().contains(".ldlog"));
    }

    #[test]
    fn test_log_path() {
        let path = log_path(Path::new("/srv/site"));
        assert_eq!(path, PathBuf::from("/srv/site/logs/debug.log"));
        assert!(path.to_string_lossy().ends_with("logs/debug.log"));
    }
}
