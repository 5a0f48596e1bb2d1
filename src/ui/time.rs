use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch, with sub-second precision.
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Human relative-time label for a timestamp, as seen from `now`.
/// A timestamp of zero means the filesystem never told us, rendered as "?".
pub fn format_relative_time(timestamp: f64, now: f64) -> String {
    if timestamp <= 0.0 {
        return "?".to_string();
    }
    let secs = now - timestamp;
    let mins = secs / 60.0;
    let hours = mins / 60.0;
    let days = hours / 24.0;
    if secs < 10.0 {
        "just now".to_string()
    } else if mins < 60.0 {
        format!("{}m ago", mins as i64)
    } else if hours < 24.0 {
        format!("{}h ago", hours as i64)
    } else if days < 30.0 {
        format!("{}d ago", days as i64)
    } else if days < 365.0 {
        format!("{}mo ago", (days / 30.0) as i64)
    } else {
        format!("{}y ago", (days / 365.0) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::format_relative_time;

    const NOW: f64 = 1_700_000_000.0;

    #[test]
    fn unknown_timestamp_renders_question_mark() {
        assert_eq!(format_relative_time(0.0, NOW), "?");
    }

    #[test]
    fn buckets_scale_with_age() {
        assert_eq!(format_relative_time(NOW - 3.0, NOW), "just now");
        assert_eq!(format_relative_time(NOW - 300.0, NOW), "5m ago");
        assert_eq!(format_relative_time(NOW - 3.0 * 3600.0, NOW), "3h ago");
        assert_eq!(format_relative_time(NOW - 5.0 * 86_400.0, NOW), "5d ago");
        assert_eq!(format_relative_time(NOW - 90.0 * 86_400.0, NOW), "3mo ago");
        assert_eq!(format_relative_time(NOW - 800.0 * 86_400.0, NOW), "2y ago");
    }

    #[test]
    fn boundary_just_under_an_hour_stays_in_minutes() {
        assert_eq!(format_relative_time(NOW - 3599.0, NOW), "59m ago");
    }
}
