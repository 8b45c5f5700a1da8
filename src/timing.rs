//! Time formatting and parsing for classification display strings
//!
//! All rendering rounds to whole milliseconds first so a value never
//! displays as `0:60.000`.

/// Render seconds as `M:SS.mmm`. Minutes are not wrapped into hours.
pub fn format_lap_time(seconds: f64) -> String {
    let millis = to_millis(seconds);
    format!("{}:{:02}.{:03}", millis / 60_000, (millis % 60_000) / 1000, millis % 1000)
}

/// Render a gap as `+M:SS.mmm` from one minute upwards, `+S.sss` below.
///
/// Negative gaps keep their sign (`-S.sss`).
pub fn format_gap(seconds: f64) -> String {
    let sign = if seconds < 0.0 { '-' } else { '+' };
    let millis = to_millis(seconds);
    if millis >= 60_000 {
        format!("{sign}{}", format_lap_time(seconds.abs()))
    } else {
        format!("{sign}{}.{:03}", millis / 1000, millis % 1000)
    }
}

/// Render a gap to pole: always a leading `+`, three decimals.
pub fn format_pole_gap(seconds: f64) -> String {
    format!("+{seconds:.3}")
}

/// Parse `M:SS.sss` back into seconds.
///
/// Anything else (bare seconds, hours, negative or non-numeric parts) is `None`.
pub fn parse_lap_time(text: &str) -> Option<f64> {
    let (minutes, seconds) = text.trim().split_once(':')?;
    if seconds.contains(':') {
        return None;
    }
    let minutes: u32 = minutes.parse().ok()?;
    let seconds: f64 = seconds.parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(f64::from(minutes) * 60.0 + seconds)
}

fn to_millis(seconds: f64) -> u64 {
    (seconds.abs() * 1000.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lap_times_render_minutes_and_millis() {
        assert_eq!(format_lap_time(90.0), "1:30.000");
        assert_eq!(format_lap_time(89.9), "1:29.900");
        assert_eq!(format_lap_time(59.9996), "1:00.000");
        assert_eq!(format_lap_time(5548.851), "92:28.851");
    }

    #[test]
    fn gaps_switch_format_at_one_minute() {
        assert_eq!(format_gap(95.123 - 90.0), "+5.123");
        assert_eq!(format_gap(65.2), "+1:05.200");
        assert_eq!(format_gap(59.9), "+59.900");
        assert_eq!(format_gap(-1.5), "-1.500");
    }

    #[test]
    fn pole_gap_always_has_plus() {
        assert_eq!(format_pole_gap(0.2), "+0.200");
        assert_eq!(format_pole_gap(-0.25), "+-0.250");
    }

    #[test]
    fn parse_rejects_malformed_input() {
        let parsed = parse_lap_time("1:30.100").unwrap();
        assert!((parsed - 90.1).abs() < 1e-9);
        assert_eq!(parse_lap_time(" 0:59.5 "), Some(59.5));
        assert_eq!(parse_lap_time("90.1"), None);
        assert_eq!(parse_lap_time("1:02:03.000"), None);
        assert_eq!(parse_lap_time("x:30.1"), None);
        assert_eq!(parse_lap_time(""), None);
    }

    proptest! {
        #[test]
        fn prop_formatted_lap_times_parse_back(seconds in 0.0f64..10_000.0) {
            let parsed = parse_lap_time(&format_lap_time(seconds));
            prop_assert!(parsed.is_some());
            prop_assert!((parsed.unwrap() - seconds).abs() <= 0.0005 + 1e-9);
        }

        #[test]
        fn prop_gaps_carry_sign_prefix(seconds in -500.0f64..500.0) {
            let gap = format_gap(seconds);
            prop_assert!(gap.starts_with('+') || gap.starts_with('-'));
        }
    }
}
