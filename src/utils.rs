//! Utility functions

/// Format seconds as `M:SS`.
///
/// Minutes are not padded and may exceed 59; fractional seconds are dropped.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Percentage of `duration` covered by `position`, 0 for an unknown duration
pub fn progress_percent(position: f64, duration: u64) -> f64 {
    if duration == 0 {
        return 0.0;
    }
    position / duration as f64 * 100.0
}

/// Parse a time typed by the user: plain seconds (`90`, `12.5`), `M:SS` or
/// `H:MM:SS`
pub fn parse_time(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut total = 0.0;
    for part in text.split(':') {
        let value: f64 = part.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        total = total * 60.0 + value;
    }
    (text.split(':').count() <= 3).then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(59.0), "0:59");
        assert_eq!(format_time(60.0), "1:00");
        assert_eq!(format_time(125.0), "2:05");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn test_format_time_drops_fraction() {
        assert_eq!(format_time(61.9), "1:01");
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0.0, 125), 0.0);
        assert!((progress_percent(62.0, 125) - 49.6).abs() < 1e-9);
        assert_eq!(progress_percent(125.0, 125), 100.0);
        assert_eq!(progress_percent(30.0, 0), 0.0);
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("90"), Some(90.0));
        assert_eq!(parse_time("12.5"), Some(12.5));
        assert_eq!(parse_time("1:30"), Some(90.0));
        assert_eq!(parse_time("1:02:03"), Some(3723.0));
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time("-5"), None);
        assert_eq!(parse_time("abc"), None);
        assert_eq!(parse_time("1:2:3:4"), None);
    }
}
