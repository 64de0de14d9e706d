//! Terminal and JSON output formatting

use colored::Colorize;
use ldlog_core::{Notice, NoticeLevel, SiteSettings};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tabled::{
    settings::{object::Columns, Modify, Style, Width},
    Table, Tabled,
};

/// Global flag for JSON output mode
static JSON_MODE: AtomicBool = AtomicBool::new(false);

/// Enable or disable JSON output mode
pub fn set_json_mode(enabled: bool) {
    JSON_MODE.store(enabled, Ordering::SeqCst);
}

/// Check if JSON output mode is enabled
pub fn is_json_mode() -> bool {
    JSON_MODE.load(Ordering::SeqCst)
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "!".yellow(), message);
}

/// Print a page notice. In JSON mode notices go to stderr.
pub fn print_notice(notice: &Notice) {
    if is_json_mode() {
        eprintln!("[{}] {}", level_label(notice.level), notice.text);
        return;
    }

    match notice.level {
        NoticeLevel::Success => print_success(&notice.text),
        NoticeLevel::Info => print_info(&notice.text),
        NoticeLevel::Warning => print_warning(&notice.text),
        NoticeLevel::Error => print_error(&notice.text),
    }
}

fn level_label(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "success",
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    }
}

/// Print log lines, as a JSON array in JSON mode
pub fn print_logs(lines: &[String]) {
    if is_json_mode() {
        print_json(lines);
        return;
    }

    if lines.is_empty() {
        println!("{}", "(log is empty)".dimmed());
        return;
    }

    for line in lines {
        println!("{}", line);
    }
}

#[derive(Tabled, Serialize)]
pub struct SettingRow {
    #[tabled(rename = "option")]
    pub option: String,
    #[tabled(rename = "value")]
    pub value: String,
}

/// Rows for the settings table
pub fn setting_rows(settings: &SiteSettings) -> Vec<SettingRow> {
    let row = |option: &str, value: String| SettingRow {
        option: option.to_string(),
        value,
    };

    let timezone = if settings.timezone_string.is_empty() {
        "(unset)".to_string()
    } else {
        settings.timezone_string.clone()
    };

    vec![
        row(ldlog_core::OPT_TIMEZONE_STRING, timezone),
        row(ldlog_core::OPT_GMT_OFFSET, settings.gmt_offset.to_string()),
        row(ldlog_core::OPT_FORCE_CAPTURE, settings.force_capture.to_string()),
        row(ldlog_core::OPT_LOG_ORDER, settings.log_order.to_string()),
        row(ldlog_core::OPT_DEBUG, settings.debug.to_string()),
    ]
}

pub fn print_settings_table(settings: &SiteSettings) {
    let rows = setting_rows(settings);

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(1)).with(Width::truncate(60)))
        .to_string();

    println!("{}", table);
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.1}G", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.1}M", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.0}K", bytes as f64 / 1024.0)
    } else {
        format!("{}B", bytes)
    }
}
