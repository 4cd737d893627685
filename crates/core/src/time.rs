//! Time parsing and formatting helpers shared across the engine.
//!
//! Schedule rules carry times as loose `HH:MM` strings and dates as
//! `dd-mm-yy` keys; bookings cross the store boundary as UTC ISO-8601
//! strings with a `Z` suffix and second precision.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Parses a loose `HH:MM` string into an `(hour, minute)` pair.
///
/// Accepts `"9"`, `"09"`, `"9:30"`, `"09:05:00"` (seconds are ignored) and
/// tolerates surrounding whitespace in each component. Returns `None` for
/// empty input, non-numeric components, or out-of-range values.
pub fn parse_hhmm(raw: &str) -> Option<(u32, u32)> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut parts = trimmed.splitn(3, ':');
    let hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = match parts.next() {
        Some(m) => m.trim().parse().ok()?,
        None => 0,
    };
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Formats an instant as ISO-8601 UTC with second precision and a `Z`
/// suffix, e.g. `2025-06-01T09:00:00Z`.
pub fn to_iso_z(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parses an ISO-8601 timestamp into a UTC instant.
///
/// Offset-carrying timestamps are converted to UTC; naive timestamps are
/// assumed to already be UTC. A space separator is accepted in place of
/// `T`. Returns `None` for anything unparsable.
pub fn parse_iso_utc(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replacen(' ', "T", 1);
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Renders a date as the `dd-mm-yy` key used by schedule rules.
pub fn rule_date_key(date: NaiveDate) -> String {
    date.format("%d-%m-%y").to_string()
}

/// Parses a `dd-mm-yy` schedule-rule date key.
pub fn parse_rule_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d-%m-%y").ok()
}

/// Midnight at the start of `date`, as a UTC instant.
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// The instant `hour:minute` on `date`, as a UTC instant.
pub fn at_time(date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hhmm_accepts_bare_hour() {
        assert_eq!(parse_hhmm("9"), Some((9, 0)));
        assert_eq!(parse_hhmm(" 14 "), Some((14, 0)));
    }

    #[test]
    fn parse_hhmm_accepts_minutes_and_ignores_seconds() {
        assert_eq!(parse_hhmm("9:30"), Some((9, 30)));
        assert_eq!(parse_hhmm("09:05:00"), Some((9, 5)));
    }

    #[test]
    fn parse_hhmm_rejects_garbage_and_out_of_range() {
        assert_eq!(parse_hhmm(""), None);
        assert_eq!(parse_hhmm("abc"), None);
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("12:60"), None);
    }

    #[test]
    fn iso_round_trip_is_second_precision_z() {
        let instant = parse_iso_utc("2025-06-01T09:00:00Z").unwrap();
        assert_eq!(to_iso_z(instant), "2025-06-01T09:00:00Z");
    }

    #[test]
    fn parse_iso_utc_handles_offsets_and_naive_forms() {
        let offset = parse_iso_utc("2025-06-01T12:00:00+03:00").unwrap();
        assert_eq!(to_iso_z(offset), "2025-06-01T09:00:00Z");

        let naive = parse_iso_utc("2025-06-01 09:00:00").unwrap();
        assert_eq!(to_iso_z(naive), "2025-06-01T09:00:00Z");

        assert_eq!(parse_iso_utc("not a date"), None);
    }

    #[test]
    fn rule_date_key_round_trips() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let key = rule_date_key(date);
        assert_eq!(key, "01-06-25");
        assert_eq!(parse_rule_date(&key), Some(date));
    }
}
