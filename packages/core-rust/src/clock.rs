//! ISO-8601 timestamp helpers.
//!
//! All temporal derivations compare against the board's `serverNow`. The
//! only place the local wall clock is read is [`wall_clock_now`], used when
//! the server omitted `serverNow` entirely.

use chrono::{DateTime, SecondsFormat, Utc};

/// Parses an RFC 3339 timestamp into UTC. Returns `None` for anything else.
#[must_use]
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Current wall-clock time as an RFC 3339 string with millisecond precision.
#[must_use]
pub fn wall_clock_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Whole minutes elapsed from `from` to `to`, floored.
///
/// Returns `None` if either side fails to parse.
#[must_use]
pub fn minutes_between(from: &str, to: &str) -> Option<i64> {
    let from = parse_instant(from)?;
    let to = parse_instant(to)?;
    Some((to - from).num_milliseconds().div_euclid(60_000))
}

/// `a < b`, false when either side fails to parse.
#[must_use]
pub fn is_before(a: &str, b: &str) -> bool {
    match (parse_instant(a), parse_instant(b)) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    }
}

/// `start <= now < end`, false when any side fails to parse.
#[must_use]
pub fn is_within(start: &str, end: &str, now: &str) -> bool {
    match (parse_instant(start), parse_instant(end), parse_instant(now)) {
        (Some(start), Some(end), Some(now)) => start <= now && now < end,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zulu_and_offset_forms() {
        let a = parse_instant("2025-12-27T23:00:00Z").unwrap();
        let b = parse_instant("2025-12-27T18:00:00-05:00").unwrap();
        assert_eq!(a, b);
        assert!(parse_instant("yesterday").is_none());
        assert!(parse_instant("").is_none());
    }

    #[test]
    fn minutes_between_floors_partial_minutes() {
        assert_eq!(
            minutes_between("2025-12-27T22:30:00Z", "2025-12-27T23:00:00Z"),
            Some(30)
        );
        assert_eq!(
            minutes_between("2025-12-27T22:30:30Z", "2025-12-27T23:00:00Z"),
            Some(29)
        );
        assert_eq!(
            minutes_between("2025-12-27T23:00:30Z", "2025-12-27T23:00:00Z"),
            Some(-1)
        );
        assert_eq!(minutes_between("bad", "2025-12-27T23:00:00Z"), None);
    }

    #[test]
    fn is_before_is_strict() {
        assert!(is_before("2025-12-27T22:59:59Z", "2025-12-27T23:00:00Z"));
        assert!(!is_before("2025-12-27T23:00:00Z", "2025-12-27T23:00:00Z"));
        assert!(!is_before("garbage", "2025-12-27T23:00:00Z"));
    }

    #[test]
    fn is_within_includes_start_excludes_end() {
        let start = "2025-12-27T10:00:00Z";
        let end = "2025-12-27T11:00:00Z";
        assert!(is_within(start, end, start));
        assert!(is_within(start, end, "2025-12-27T10:59:59Z"));
        assert!(!is_within(start, end, end));
        assert!(!is_within(start, end, "2025-12-27T09:59:59Z"));
    }

    #[test]
    fn wall_clock_now_round_trips_through_parser() {
        assert!(parse_instant(&wall_clock_now()).is_some());
    }
}
