//! Timestamp rendering for cards and tables.
//!
//! All times are shown in UTC; the server has no notion of the viewer's zone.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

const DISPLAY_FORMAT: &str = "%b %-d %Y %-I:%M:%S %p";

pub fn from_epoch_ms(epoch_ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(epoch_ms).single()
}

/// Parses FIO `Timestamp` fields, which usually carry no zone and are UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// `Mar 30 2024 1:05:09 PM`
pub fn format_display(dt: &DateTime<Utc>) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}

/// `2024-03-30T13:05:09+00:00`
pub fn format_iso(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, false)
}

pub fn format_epoch_ms(epoch_ms: i64) -> String {
    from_epoch_ms(epoch_ms)
        .map(|dt| format_iso(&dt))
        .unwrap_or_else(|| epoch_ms.to_string())
}

/// Human distance between `then` and `now`, e.g. `3 hours ago` or `in a day`.
pub fn relative_to(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(*then).num_seconds();
    let past = delta >= 0;
    let secs = delta.unsigned_abs() as f64;

    let minutes = secs / 60.0;
    let hours = minutes / 60.0;
    let days = hours / 24.0;

    let phrase = if secs < 45.0 {
        "a few seconds".to_string()
    } else if secs < 90.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{} minutes", minutes.round() as i64)
    } else if minutes < 90.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{} hours", hours.round() as i64)
    } else if hours < 36.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{} days", days.round() as i64)
    } else if days < 46.0 {
        "a month".to_string()
    } else if days < 320.0 {
        format!("{} months", (days / 30.4).round() as i64)
    } else if days < 548.0 {
        "a year".to_string()
    } else {
        format!("{} years", (days / 365.0).round() as i64)
    };

    if past {
        format!("{} ago", phrase)
    } else {
        format!("in {}", phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_parse_timestamp_without_zone() {
        let dt = parse_timestamp("2024-03-30T13:05:09.123").unwrap();
        assert_eq!(format_display(&dt), "Mar 30 2024 1:05:09 PM");
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let dt = parse_timestamp("2024-03-30T13:05:09+02:00").unwrap();
        assert_eq!(format_iso(&dt), "2024-03-30T11:05:09+00:00");
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_format_epoch_ms() {
        assert_eq!(format_epoch_ms(0), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_relative_to() {
        let now = Utc.with_ymd_and_hms(2024, 3, 30, 12, 0, 0).unwrap();
        assert_eq!(relative_to(&(now - Duration::seconds(10)), &now), "a few seconds ago");
        assert_eq!(relative_to(&(now - Duration::minutes(5)), &now), "5 minutes ago");
        assert_eq!(relative_to(&(now - Duration::hours(3)), &now), "3 hours ago");
        assert_eq!(relative_to(&(now - Duration::hours(30)), &now), "a day ago");
        assert_eq!(relative_to(&(now + Duration::days(3)), &now), "in 3 days");
        assert_eq!(relative_to(&(now - Duration::days(800)), &now), "2 years ago");
    }
}
