//! Lap time enumerations and display formatting.

use crate::error::CoreError;
use crate::validation::check_one_of;

/// Sessions lap times are recorded for. Narrower than setup sessions.
pub const LAP_SESSION_TYPES: &[&str] = &["Practice", "Qualifying", "Race", "Test"];

pub fn check_session_type(session_type: &str) -> Result<(), CoreError> {
    check_one_of("sessionType", session_type, LAP_SESSION_TYPES)
}

/// Split milliseconds into `(minutes, seconds, millis)`.
pub fn split_lap_time(ms: i64) -> (i64, i64, i64) {
    (ms / 60_000, (ms % 60_000) / 1_000, ms % 1_000)
}

/// Render milliseconds as `mm:ss.mmm`.
///
/// Negative input is clamped to zero. Laps of 100 minutes or more render
/// with extra minute digits rather than wrapping.
pub fn format_lap_time(ms: i64) -> String {
    let (minutes, seconds, millis) = split_lap_time(ms.max(0));
    format!("{minutes:02}:{seconds:02}.{millis:03}")
}

/// Sector times render only when present and non-zero.
pub fn format_sector(ms: Option<i64>) -> Option<String> {
    ms.filter(|&v| v > 0).map(format_lap_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn formats_typical_lap() {
        assert_eq!(format_lap_time(83_456), "01:23.456");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_lap_time(0), "00:00.000");
    }

    #[test]
    fn pads_each_component() {
        assert_eq!(format_lap_time(60_000 + 5_000 + 7), "01:05.007");
    }

    #[test]
    fn shape_and_arithmetic_hold_across_range() {
        let shape = Regex::new(r"^\d{2}:\d{2}\.\d{3}$").unwrap();
        for ms in (0..6_000_000).step_by(7_919) {
            let formatted = format_lap_time(ms);
            assert!(shape.is_match(&formatted), "{formatted}");
            let (m, s, milli) = split_lap_time(ms);
            assert_eq!(m * 60_000 + s * 1_000 + milli, ms);
        }
    }

    #[test]
    fn sector_zero_or_missing_is_none() {
        assert_eq!(format_sector(None), None);
        assert_eq!(format_sector(Some(0)), None);
        assert_eq!(format_sector(Some(28_001)).as_deref(), Some("00:28.001"));
    }

    #[test]
    fn lap_session_rejects_warm_up() {
        let err = check_session_type("Warm-Up").unwrap_err();
        assert!(err
            .to_string()
            .contains("Must be one of: Practice, Qualifying, Race, Test"));
    }
}
