//! Timezone resolution from site settings

use ldlog_core::SiteSettings;

/// Resolve the display timezone.
///
/// An explicit timezone name wins. Otherwise the numeric UTC offset is
/// mapped to a fixed `Etc/GMT` zone, whose sign is inverted relative to the
/// usual notation (UTC+9 is `Etc/GMT-9`). Zero offset is `UTC`.
pub fn resolve_timezone(settings: &SiteSettings) -> String {
    if !settings.timezone_string.is_empty() {
        return settings.timezone_string.clone();
    }
    offset_to_zone(settings.gmt_offset)
}

/// Map an hour offset to an `Etc/GMT` zone. Fractions are truncated.
pub fn offset_to_zone(offset_hours: f64) -> String {
    if offset_hours == 0.0 || !offset_hours.is_finite() {
        return "UTC".to_string();
    }
    let inverted = (-offset_hours).trunc() as i64;
    format!("Etc/GMT{:+}", inverted)
}
