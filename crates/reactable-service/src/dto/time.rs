//! Relative-time formatting for listing rows

use chrono::{DateTime, Utc};

/// Format the distance between `then` and `now` as relative text.
///
/// Anything under a minute reads "just now", which is also what the
/// controllers stamp on optimistically prepended rows.
pub fn humanize_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);

    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = hours / 24;
    if days < 7 {
        return plural(days, "day");
    }

    let weeks = days / 7;
    if days < 30 {
        return plural(weeks, "week");
    }

    let months = days / 30;
    if days < 365 {
        return plural(months, "month");
    }

    plural(days / 365, "year")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_just_now() {
        let now = Utc::now();
        assert_eq!(humanize_ago(now, now), "just now");
        assert_eq!(humanize_ago(now - Duration::seconds(59), now), "just now");
        // Clock skew never produces negative phrasing
        assert_eq!(humanize_ago(now + Duration::seconds(30), now), "just now");
    }

    #[test]
    fn test_minutes_and_hours() {
        let now = Utc::now();
        assert_eq!(
            humanize_ago(now - Duration::minutes(1), now),
            "1 minute ago"
        );
        assert_eq!(
            humanize_ago(now - Duration::minutes(5), now),
            "5 minutes ago"
        );
        assert_eq!(humanize_ago(now - Duration::hours(3), now), "3 hours ago");
    }

    #[test]
    fn test_days_weeks_months_years() {
        let now = Utc::now();
        assert_eq!(humanize_ago(now - Duration::days(2), now), "2 days ago");
        assert_eq!(humanize_ago(now - Duration::days(14), now), "2 weeks ago");
        assert_eq!(humanize_ago(now - Duration::days(90), now), "3 months ago");
        assert_eq!(humanize_ago(now - Duration::days(800), now), "2 years ago");
    }
}
