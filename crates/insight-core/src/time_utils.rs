use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Parse an IANA timezone name, falling back to UTC with a warning.
pub fn parse_timezone(tz_name: &str) -> Tz {
    tz_name.parse::<Tz>().unwrap_or_else(|_| {
        warn!("unrecognised timezone \"{}\", falling back to UTC", tz_name);
        Tz::UTC
    })
}

// ── Epoch conversion ──────────────────────────────────────────────────────────

/// Convert an epoch-seconds value (as the API delivers timestamps) into a
/// UTC [`DateTime`]. Returns `None` for values outside chrono's range.
pub fn epoch_to_utc(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}

// ── Display formatting ────────────────────────────────────────────────────────

/// Resolve an explicit time-format setting to a 12-hour flag.
///
/// `"12h"` → `true`, `"24h"` → `false`, anything else (`"auto"`) → `false`.
pub fn use_twelve_hour(time_format: &str) -> bool {
    matches!(time_format, "12h")
}

/// Format a UTC timestamp for display in the given timezone.
pub fn format_timestamp(dt: DateTime<Utc>, tz: Tz, twelve_hour: bool) -> String {
    let local = dt.with_timezone(&tz);
    if twelve_hour {
        local.format("%Y-%m-%d %I:%M %p").to_string()
    } else {
        local.format("%Y-%m-%d %H:%M").to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_system_timezone_nonempty() {
        assert!(!get_system_timezone().is_empty());
    }

    #[test]
    fn test_parse_timezone_valid() {
        assert_eq!(parse_timezone("Asia/Dhaka"), Tz::Asia__Dhaka);
        assert_eq!(parse_timezone("UTC"), Tz::UTC);
    }

    #[test]
    fn test_parse_timezone_invalid_falls_back_to_utc() {
        assert_eq!(parse_timezone("Mars/Olympus"), Tz::UTC);
    }

    #[test]
    fn test_epoch_to_utc() {
        let dt = epoch_to_utc(1_700_000_000).unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_epoch_to_utc_out_of_range() {
        assert!(epoch_to_utc(i64::MAX).is_none());
    }

    #[test]
    fn test_use_twelve_hour() {
        assert!(use_twelve_hour("12h"));
        assert!(!use_twelve_hour("24h"));
        assert!(!use_twelve_hour("auto"));
    }

    #[test]
    fn test_format_timestamp_timezone_shift() {
        // 2023-11-14 22:13:20 UTC is 2023-11-15 04:13:20 in Dhaka (UTC+6).
        let dt = epoch_to_utc(1_700_000_000).unwrap();
        let formatted = format_timestamp(dt, Tz::Asia__Dhaka, false);
        assert_eq!(formatted, "2023-11-15 04:13");
    }

    #[test]
    fn test_format_timestamp_twelve_hour() {
        let dt = epoch_to_utc(1_700_000_000).unwrap();
        let formatted = format_timestamp(dt, Tz::UTC, true);
        assert_eq!(formatted, "2023-11-14 10:13 PM");
    }
}
