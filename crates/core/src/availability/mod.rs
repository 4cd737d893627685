//! Slot generation: resolving schedule rules against bookings to produce
//! concrete availability.

pub mod matcher;
pub mod slots;

use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::debug;

use crate::cache::RuleCache;
use crate::clock::Clock;
use crate::errors::EngineResult;
use crate::models::{BookingRecord, ScheduleRule, Slot};
use crate::normalize::{LocationRule, SessionCategory};
use crate::store::{BookingStore, RuleStore};
use crate::time::{day_start, parse_iso_utc, rule_date_key};

use matcher::match_rule;
use slots::FreeSlots;

/// How far ahead the date picker looks, days.
pub const DATE_LOOKAHEAD_DAYS: u64 = 30;

/// Read side of the engine: answers "what can be booked, and when".
pub struct AvailabilityService {
    rules: Arc<dyn RuleStore>,
    bookings: Arc<dyn BookingStore>,
    clock: Arc<dyn Clock>,
    cache: RuleCache,
}

impl AvailabilityService {
    pub fn new(
        rules: Arc<dyn RuleStore>,
        bookings: Arc<dyn BookingStore>,
        clock: Arc<dyn Clock>,
        cache_ttl_secs: i64,
    ) -> Self {
        let cache = RuleCache::new(cache_ttl_secs, clock.clone());
        AvailabilityService {
            rules,
            bookings,
            clock,
            cache,
        }
    }

    /// All concrete free slots on `date` for the requested session type and
    /// (optional) location, sorted by start time.
    ///
    /// Overlapping rules may yield the same bookable time more than once;
    /// duplicates are handed back as-is.
    pub async fn list_available_slots(
        &self,
        date: NaiveDate,
        requested: SessionCategory,
        selected_location: Option<&str>,
    ) -> EngineResult<Vec<Slot>> {
        let rules = self.cached_rules().await?;
        let records = self.bookings.get_for_date(date).await?;
        let busy = busy_intervals(&records);
        let now = self.clock.now();

        let mut available = Vec::new();
        for rule in &rules {
            let Some(window) = match_rule(date, rule, selected_location, requested) else {
                continue;
            };
            let location = resolve_slot_location(&window.location, selected_location);
            for (start, end) in FreeSlots::new(
                window.start,
                window.end,
                window.duration_min,
                window.interval_min,
                now,
                &busy,
            ) {
                available.push(Slot::new(
                    start,
                    end,
                    location.clone(),
                    requested.as_str().to_string(),
                ));
            }
        }
        available.sort_by_key(|slot| slot.start);
        Ok(available)
    }

    /// Dates within the next [`DATE_LOOKAHEAD_DAYS`] days that have at
    /// least one free slot, as `dd-mm-yy` keys in chronological order.
    ///
    /// Bookings for the whole window are fetched once and bucketed by day;
    /// each day then stops at its first free slot.
    pub async fn available_dates(
        &self,
        requested: SessionCategory,
        selected_location: Option<&str>,
    ) -> EngineResult<Vec<String>> {
        let now = self.clock.now();
        let today = now.date_naive();
        let horizon = today
            .checked_add_days(Days::new(DATE_LOOKAHEAD_DAYS))
            .unwrap_or(today);

        let rules = self.cached_rules().await?;
        let records = self
            .bookings
            .get_range(day_start(today), day_start(horizon))
            .await?;

        let mut dates = Vec::new();
        let mut day = today;
        while day < horizon {
            let busy = busy_intervals_for_day(&records, day);
            if has_free_slot(&rules, day, requested, selected_location, now, &busy) {
                dates.push(rule_date_key(day));
            }
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        Ok(dates)
    }

    /// Whether `date` has at least one free slot. Stops at the first hit.
    pub async fn has_available_slots(
        &self,
        date: NaiveDate,
        requested: SessionCategory,
        selected_location: Option<&str>,
    ) -> EngineResult<bool> {
        let rules = self.cached_rules().await?;
        let records = self.bookings.get_for_date(date).await?;
        let busy = busy_intervals(&records);
        let now = self.clock.now();
        Ok(has_free_slot(
            &rules,
            date,
            requested,
            selected_location,
            now,
            &busy,
        ))
    }

    /// Drops the cached rule set so the next query re-reads storage.
    pub fn invalidate_rules(&self) {
        self.cache.invalidate();
    }

    async fn cached_rules(&self) -> EngineResult<Vec<ScheduleRule>> {
        if let Some(rules) = self.cache.get() {
            return Ok(rules);
        }
        let rules = self.rules.get_all().await?;
        self.cache.put(rules.clone());
        Ok(rules)
    }
}

fn has_free_slot(
    rules: &[ScheduleRule],
    date: NaiveDate,
    requested: SessionCategory,
    selected_location: Option<&str>,
    now: DateTime<Utc>,
    busy: &[(DateTime<Utc>, DateTime<Utc>)],
) -> bool {
    rules.iter().any(|rule| {
        match_rule(date, rule, selected_location, requested)
            .map(|window| {
                FreeSlots::new(
                    window.start,
                    window.end,
                    window.duration_min,
                    window.interval_min,
                    now,
                    busy,
                )
                .next()
                .is_some()
            })
            .unwrap_or(false)
    })
}

fn resolve_slot_location(
    rule_location: &LocationRule,
    selected_location: Option<&str>,
) -> Option<String> {
    match rule_location {
        LocationRule::Online => None,
        LocationRule::Exact(addr) => Some(addr.clone()),
        LocationRule::Any => selected_location.map(|sel| sel.trim().to_string()),
    }
}

/// Busy intervals from booking records. Records whose timestamps do not
/// parse are skipped with a debug log rather than failing the query.
fn busy_intervals(records: &[BookingRecord]) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    records
        .iter()
        .filter_map(|record| match (parse_iso_utc(&record.start), parse_iso_utc(&record.end)) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => {
                debug!(booking_id = %record.id, "skipping booking with malformed timestamps");
                None
            }
        })
        .collect()
}

fn busy_intervals_for_day(
    records: &[BookingRecord],
    day: NaiveDate,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    records
        .iter()
        .filter_map(|record| match (parse_iso_utc(&record.start), parse_iso_utc(&record.end)) {
            (Some(start), Some(end)) if start.date_naive() == day => Some((start, end)),
            (Some(_), Some(_)) => None,
            _ => {
                debug!(booking_id = %record.id, "skipping booking with malformed timestamps");
                None
            }
        })
        .collect()
}
