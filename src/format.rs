//! Display formatting for counts and timestamps

use chrono::{DateTime, Utc};

const UNITS: [(&str, f64); 2] = [("K", 1e3), ("M", 1e6)];

/// Compact rendering of a count: `950`, `1.2K`, `3.4M`, `1B`.
///
/// One decimal is kept and a trailing `.0` dropped. Values that round up to
/// the next unit are promoted (999 950 renders as `1M`, not `1000K`).
pub fn compact_number(value: u64) -> String {
    if value < 1_000 {
        return value.to_string();
    }

    let value = value as f64;
    for (suffix, scale) in UNITS {
        let scaled = round_tenth(value / scale);
        if scaled < 1_000.0 {
            return format!("{}{}", trim_decimal(scaled), suffix);
        }
    }

    format!("{}B", trim_decimal(round_tenth(value / 1e9)))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn trim_decimal(value: f64) -> String {
    let rendered = format!("{:.1}", value);
    rendered
        .strip_suffix(".0")
        .map(str::to_string)
        .unwrap_or(rendered)
}

/// Relative time such as "5 minutes ago".
///
/// Timestamps in the future (clock skew between backend and client) and
/// anything under a minute render as "just now".
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let Ok(elapsed) = elapsed.to_std() else {
        return "just now".to_string();
    };

    if elapsed.as_secs() < 60 {
        return "just now".to_string();
    }

    let mut formatter = timeago::Formatter::new();
    formatter.num_items(1);
    formatter.convert(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_small_numbers_are_verbatim() {
        assert_eq!(compact_number(0), "0");
        assert_eq!(compact_number(950), "950");
    }

    #[test]
    fn test_thousands_and_millions() {
        assert_eq!(compact_number(1_000), "1K");
        assert_eq!(compact_number(1_234), "1.2K");
        assert_eq!(compact_number(3_400_000), "3.4M");
        assert_eq!(compact_number(2_000_000_000), "2B");
    }

    #[test]
    fn test_rounding_promotes_unit() {
        assert_eq!(compact_number(999_950), "1M");
    }

    #[test]
    fn test_time_ago_minutes() {
        let now = Utc::now();
        let rendered = time_ago(now - Duration::minutes(5), now);
        assert!(rendered.contains("minute"), "got {}", rendered);
        assert!(rendered.contains('5'), "got {}", rendered);
    }

    #[test]
    fn test_time_ago_hours() {
        let now = Utc::now();
        let rendered = time_ago(now - Duration::hours(3), now);
        assert!(rendered.contains("hour"), "got {}", rendered);
    }

    #[test]
    fn test_time_ago_future_and_recent() {
        let now = Utc::now();
        assert_eq!(time_ago(now + Duration::minutes(2), now), "just now");
        assert_eq!(time_ago(now - Duration::seconds(10), now), "just now");
    }
}
