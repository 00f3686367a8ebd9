//! PIREP recency window and UTC timestamp helpers

use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, Utc};

/// Trailing window used to bound pilot-report queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyWindow {
    hours: u32,
}

impl RecencyWindow {
    pub const DEFAULT_HOURS: u32 = 6;

    pub fn new(hours: u32) -> Self {
        Self { hours }
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    /// Lower bound for a window ending at `now`.
    ///
    /// A window reaching past the representable range falls back to the
    /// default length.
    pub fn boundary_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        Duration::try_hours(i64::from(self.hours))
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or_else(|| now - Duration::hours(i64::from(Self::DEFAULT_HOURS)))
    }

    /// Lower bound for a window ending at the current instant
    pub fn boundary(&self) -> DateTime<Utc> {
        self.boundary_at(Utc::now())
    }
}

impl Default for RecencyWindow {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HOURS)
    }
}

/// ISO-8601 with microseconds and a trailing `Z`
pub fn format_iso_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 (`Z` or numeric offset) and offset-less ISO-8601, which
/// is taken as UTC.
pub fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_boundary_is_exactly_six_hours_back() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let boundary = RecencyWindow::default().boundary_at(now);
        assert_eq!(boundary, Utc.with_ymd_and_hms(2026, 10, 16, 6, 0, 0).unwrap());
        assert_eq!(now - boundary, Duration::hours(6));
    }

    #[test]
    fn test_boundary_crosses_midnight() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 2, 30, 0).unwrap();
        let boundary = RecencyWindow::new(6).boundary_at(now);
        assert_eq!(boundary, Utc.with_ymd_and_hms(2025, 12, 31, 20, 30, 0).unwrap());
    }

    #[test]
    fn test_oversized_window_falls_back_to_default() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let boundary = RecencyWindow::new(u32::MAX).boundary_at(now);
        assert_eq!(boundary, RecencyWindow::default().boundary_at(now));
    }

    #[test]
    fn test_boundary_tracks_the_clock() {
        let window = RecencyWindow::default();
        let before = Utc::now();
        let first = window.boundary();
        let second = window.boundary();
        let after = Utc::now();

        assert!(first <= second);
        assert!(first >= window.boundary_at(before));
        assert!(second <= window.boundary_at(after));
    }

    #[test]
    fn test_format_iso_utc_has_z_suffix() {
        let instant = Utc.with_ymd_and_hms(2026, 10, 16, 6, 5, 9).unwrap();
        assert_eq!(format_iso_utc(instant), "2026-10-16T06:05:09.000000Z");
    }

    #[test]
    fn test_parse_utc_variants() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 16, 14, 30, 0).unwrap();
        assert_eq!(parse_utc("2026-10-16T14:30:00Z"), Some(expected));
        assert_eq!(parse_utc("2026-10-16T14:30:00+00:00"), Some(expected));
        assert_eq!(parse_utc("2026-10-16T16:30:00+02:00"), Some(expected));
        assert_eq!(parse_utc("2026-10-16T14:30:00.000000"), Some(expected));
        assert_eq!(parse_utc("2026-10-16 14:30:00"), Some(expected));
    }

    #[test]
    fn test_parse_utc_rejects_garbage() {
        assert_eq!(parse_utc(""), None);
        assert_eq!(parse_utc("yesterday"), None);
        assert_eq!(parse_utc("16/10/2026 14:30"), None);
    }
}
