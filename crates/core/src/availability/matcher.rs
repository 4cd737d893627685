use chrono::{DateTime, NaiveDate, Utc};

use crate::models::ScheduleRule;
use crate::normalize::{LocationRule, SessionCategory};
use crate::time::{at_time, day_start, parse_hhmm, parse_rule_date};

/// Session length used when a rule does not specify one, minutes.
pub const DEFAULT_DURATION_MIN: u32 = 50;

/// A schedule rule resolved against a concrete date and request: the
/// absolute window plus the stepping parameters for slot generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_min: u32,
    pub interval_min: u32,
    pub location: LocationRule,
}

/// Resolves a rule against a request, returning the bookable window when
/// the rule applies.
///
/// A rule applies when its date key matches `date`, its location admits the
/// client's selection, and its session type serves the requested category.
/// An empty session type on the rule means no filter; a `rest` rule serves
/// nothing.
///
/// Window times are lenient the way the schedule editor is: if both times
/// are unparsable the rule covers the whole day, but a rule with exactly
/// one unparsable time, or an inverted window, is rejected outright.
pub fn match_rule(
    date: NaiveDate,
    rule: &ScheduleRule,
    selected_location: Option<&str>,
    requested: SessionCategory,
) -> Option<RuleWindow> {
    if parse_rule_date(&rule.date)? != date {
        return None;
    }

    let location = LocationRule::from_label(&rule.location);
    if !location.admits(selected_location) {
        return None;
    }

    let type_label = rule.session_type.trim();
    if !type_label.is_empty() && !SessionCategory::from_label(type_label).allows(requested) {
        return None;
    }

    let (window_start, window_end) = match (parse_hhmm(&rule.start), parse_hhmm(&rule.end)) {
        (Some((sh, sm)), Some((eh, em))) => (at_time(date, sh, sm)?, at_time(date, eh, em)?),
        (None, None) => (day_start(date), at_time(date, 23, 59)?),
        _ => return None,
    };
    if window_start >= window_end {
        return None;
    }

    let duration_min = match rule.duration {
        Some(d) if d > 0 => d,
        _ => DEFAULT_DURATION_MIN,
    };
    let interval_min = match rule.interval {
        Some(i) if i > 0 => i,
        _ => duration_min,
    };

    Some(RuleWindow {
        start: window_start,
        end: window_end,
        duration_min,
        interval_min,
        location,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn rule() -> ScheduleRule {
        ScheduleRule {
            id: None,
            date: "01-06-25".into(),
            start: "09:00".into(),
            end: "12:00".into(),
            duration: Some(50),
            interval: None,
            location: "любой".into(),
            session_type: "any".into(),
            deleted: false,
        }
    }

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn matching_rule_produces_window() {
        let window = match_rule(june_first(), &rule(), None, SessionCategory::Online).unwrap();
        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
        );
        assert_eq!(window.end, Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
        assert_eq!(window.duration_min, 50);
        assert_eq!(window.interval_min, 50);
    }

    #[test]
    fn other_dates_do_not_match() {
        let other = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert!(match_rule(other, &rule(), None, SessionCategory::Online).is_none());
    }

    #[test]
    fn rest_rule_never_matches() {
        let mut blackout = rule();
        blackout.session_type = "отдых".into();
        assert!(match_rule(june_first(), &blackout, None, SessionCategory::Online).is_none());
        assert!(match_rule(june_first(), &blackout, None, SessionCategory::Offline).is_none());
    }

    #[test]
    fn empty_session_type_serves_everything() {
        let mut open = rule();
        open.session_type = "  ".into();
        assert!(match_rule(june_first(), &open, None, SessionCategory::Online).is_some());
        assert!(match_rule(june_first(), &open, None, SessionCategory::Sand).is_some());
    }

    #[test]
    fn sand_rule_serves_in_person_requests() {
        let mut sand = rule();
        sand.session_type = "песочная терапия".into();
        assert!(match_rule(june_first(), &sand, None, SessionCategory::Offline).is_some());
        assert!(match_rule(june_first(), &sand, None, SessionCategory::Online).is_none());
    }

    #[test]
    fn both_times_unparsable_covers_whole_day() {
        let mut open = rule();
        open.start = "".into();
        open.end = "garbage".into();
        let window = match_rule(june_first(), &open, None, SessionCategory::Offline).unwrap();
        assert_eq!(window.start, Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2025, 6, 1, 23, 59, 0).unwrap());
    }

    #[test]
    fn single_unparsable_time_rejects_rule() {
        let mut broken = rule();
        broken.start = "garbage".into();
        assert!(match_rule(june_first(), &broken, None, SessionCategory::Offline).is_none());
    }

    #[test]
    fn inverted_window_rejects_rule() {
        let mut inverted = rule();
        inverted.start = "14:00".into();
        inverted.end = "09:00".into();
        assert!(match_rule(june_first(), &inverted, None, SessionCategory::Offline).is_none());
    }

    #[test]
    fn zero_duration_falls_back_to_default() {
        let mut zeroed = rule();
        zeroed.duration = Some(0);
        zeroed.interval = Some(0);
        let window = match_rule(june_first(), &zeroed, None, SessionCategory::Offline).unwrap();
        assert_eq!(window.duration_min, DEFAULT_DURATION_MIN);
        assert_eq!(window.interval_min, DEFAULT_DURATION_MIN);
    }

    #[test]
    fn location_mismatch_rejects_rule() {
        let mut located = rule();
        located.location = "ул. Ленина 5".into();
        assert!(
            match_rule(june_first(), &located, Some("другой адрес"), SessionCategory::Offline)
                .is_none()
        );
        assert!(
            match_rule(june_first(), &located, Some("ул. Ленина 5"), SessionCategory::Offline)
                .is_some()
        );
    }
}
