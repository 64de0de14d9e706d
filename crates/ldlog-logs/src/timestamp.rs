//! UTC timestamp extraction and local-time conversion
//!
//! PHP's `error_log()` prefixes every entry with `[DD-Mon-YYYY HH:MM:SS UTC]`.
//! Lines carrying that prefix get a local-time tag prepended; everything else
//! passes through untouched. Conversion failures never raise: they yield
//! `None` and the line is shown as it was written.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Format of the timestamp inside PHP's error_log prefix
pub const ERROR_LOG_TIME_FORMAT: &str = "%d-%b-%Y %H:%M:%S";

static UTC_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[([0-9]{2}-[A-Za-z]{3}-[0-9]{4} [0-9]{2}:[0-9]{2}:[0-9]{2}) UTC\]")
        .expect("Invalid UTC prefix regex")
});

/// Accepted input formats, all interpreted as UTC
const INPUT_FORMATS: &[&str] = &[
    ERROR_LOG_TIME_FORMAT,
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

/// Extract the UTC timestamp from a line starting with `[... UTC]`
pub fn extract_utc_timestamp(line: &str) -> Option<&str> {
    UTC_PREFIX_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse a timezone identifier
pub fn parse_timezone(timezone: &str) -> Option<Tz> {
    match timezone.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(e) => {
            debug!("Unknown timezone {:?}: {}", timezone, e);
            None
        }
    }
}

/// Whether `timezone` names a zone in the timezone database
pub fn is_known_timezone(timezone: &str) -> bool {
    timezone.parse::<Tz>().is_ok()
}

/// Parse a UTC timestamp. An empty string means now.
pub fn parse_utc(timestamp: &str) -> Option<DateTime<Utc>> {
    let timestamp = timestamp.trim();
    if timestamp.is_empty() {
        return Some(Utc::now());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.with_timezone(&Utc));
    }

    let parsed = INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(timestamp, format).ok())
        .map(|naive| naive.and_utc());

    if parsed.is_none() {
        debug!("Unparseable timestamp {:?}", timestamp);
    }
    parsed
}

fn to_zone(timestamp: &str, timezone: &str) -> Option<DateTime<Tz>> {
    let tz = parse_timezone(timezone)?;
    parse_utc(timestamp).map(|utc| utc.with_timezone(&tz))
}

/// Convert a UTC timestamp to `YYYY-MM-DD HH:MM:SS` in `timezone`
pub fn convert_to_local(utc_timestamp: &str, timezone: &str) -> Option<String> {
    to_zone(utc_timestamp, timezone).map(|local| local.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Convert a UTC timestamp to `<ZONE> YYYY/MM/DD HH:MM:SS` in `timezone`,
/// e.g. `JST 2025/08/06 15:30:45`
pub fn format_local_timestamp(utc_timestamp: &str, timezone: &str) -> Option<String> {
    to_zone(utc_timestamp, timezone).map(|local| format_tagged(&local))
}

fn format_tagged(local: &DateTime<Tz>) -> String {
    local.format("%Z %Y/%m/%d %H:%M:%S").to_string()
}

/// Prefix every line carrying a UTC timestamp with its local time.
///
/// Output has the same length and order as the input. Lines without a
/// timestamp, or whose conversion fails, are returned unchanged.
pub fn format_lines_with_local_time<S: AsRef<str>>(lines: &[S], timezone: &str) -> Vec<String> {
    let tz = parse_timezone(timezone);

    lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            let tag = tz.as_ref().and_then(|tz| {
                let utc = parse_utc(extract_utc_timestamp(line)?)?;
                Some(format_tagged(&utc.with_timezone(tz)))
            });

            match tag {
                Some(tag) if !tag.is_empty() => format!("[{}] {}", tag, line),
                _ => line.to_string(),
            }
        })
        .collect()
}
