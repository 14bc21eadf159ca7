use chrono::{DateTime, Utc};

pub(super) fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Human "N units ago" relative to `now`.
pub(super) fn relative_to(at: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(*at).num_seconds();
    if secs < 0 {
        return "in the future".to_string();
    }
    if secs < 60 {
        return "just now".to_string();
    }
    let (count, unit) = match secs {
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s if s < 30 * 86_400 => (s / 86_400, "day"),
        s if s < 365 * 86_400 => (s / (30 * 86_400), "month"),
        s => (s / (365 * 86_400), "year"),
    };
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, relative_to};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn formats_record_timestamp_in_utc() {
        let at = Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(format_timestamp(&at), "2021-03-04 05:06 UTC");
    }

    #[test]
    fn relative_buckets() {
        let now = Utc.with_ymd_and_hms(2021, 3, 10, 0, 0, 0).unwrap();
        assert_eq!(relative_to(&(now - Duration::seconds(5)), &now), "just now");
        assert_eq!(relative_to(&(now - Duration::minutes(1)), &now), "1 minute ago");
        assert_eq!(relative_to(&(now - Duration::hours(5)), &now), "5 hours ago");
        assert_eq!(relative_to(&(now - Duration::days(3)), &now), "3 days ago");
        assert_eq!(relative_to(&(now - Duration::days(65)), &now), "2 months ago");
        assert_eq!(relative_to(&(now - Duration::days(800)), &now), "2 years ago");
        assert_eq!(relative_to(&(now + Duration::days(1)), &now), "in the future");
    }
}
