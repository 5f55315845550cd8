//! Datetime helpers for calendar events and tasks.
//!
//! Calendar events carry `start.dateTime` / `end.dateTime`; tasks carry
//! `due`. Timestamps may be RFC 3339 (with `Z` or an offset) or naive ISO
//! strings, which are taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde_json::Value;

/// Parse an ISO-8601 timestamp, normalizing to UTC.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Start time of a calendar event (`start.dateTime`, or `start.date` for all-day events).
pub fn event_start(event: &Value) -> Option<DateTime<Utc>> {
    event_time(event, "start")
}

/// End time of a calendar event.
pub fn event_end(event: &Value) -> Option<DateTime<Utc>> {
    event_time(event, "end")
}

fn event_time(event: &Value, key: &str) -> Option<DateTime<Utc>> {
    let slot = event.get(key)?;
    slot.get("dateTime")
        .or_else(|| slot.get("date"))
        .or(Some(slot))
        .and_then(Value::as_str)
        .and_then(parse_datetime)
}

/// Due time of a task (`due`).
pub fn task_due(task: &Value) -> Option<DateTime<Utc>> {
    task.get("due").and_then(Value::as_str).and_then(parse_datetime)
}

/// End of a lookahead window of `days` from `now`.
///
/// Negative spans collapse to `now`; spans past the representable range
/// saturate at the latest representable instant.
pub fn window_end(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(days.max(0))
        .and_then(|span| now.checked_add_signed(span))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Whether `at` falls inside `[from, until]`.
pub fn within(at: DateTime<Utc>, from: DateTime<Utc>, until: DateTime<Utc>) -> bool {
    from <= at && at <= until
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_datetime("2026-03-02T09:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 3, 2, 7, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_zulu_and_naive() {
        let zulu = parse_datetime("2026-03-02T09:00:00Z").unwrap();
        let naive = parse_datetime("2026-03-02T09:00:00").unwrap();
        assert_eq!(zulu, naive);
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_datetime("2026-03-02").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_datetime("next tuesday").is_none());
    }

    #[test]
    fn test_event_start_variants() {
        let timed = json!({"start": {"dateTime": "2026-03-02T09:00:00Z"}});
        let all_day = json!({"start": {"date": "2026-03-02"}});
        let flat = json!({"start": "2026-03-02T09:00:00Z"});
        assert!(event_start(&timed).is_some());
        assert!(event_start(&all_day).is_some());
        assert!(event_start(&flat).is_some());
        assert!(event_start(&json!({"title": "x"})).is_none());
    }

    #[test]
    fn test_window_end_saturates() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(window_end(now, 7), Utc.with_ymd_and_hms(2026, 3, 8, 12, 0, 0).unwrap());
        assert_eq!(window_end(now, -3), now);
        assert_eq!(window_end(now, i64::MAX), DateTime::<Utc>::MAX_UTC);
        assert_eq!(window_end(now, 200_000_000), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_task_due() {
        assert!(task_due(&json!({"due": "2026-03-02T23:59:00Z"})).is_some());
        assert!(task_due(&json!({"title": "essay"})).is_none());
    }
}
