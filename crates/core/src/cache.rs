use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use crate::clock::Clock;
use crate::models::ScheduleRule;

/// Default lifetime of a cached rule set, seconds.
pub const DEFAULT_RULES_TTL_SECS: i64 = 5;

struct CacheEntry {
    loaded_at: DateTime<Utc>,
    rules: Vec<ScheduleRule>,
}

/// Short-lived cache of the full rule set.
///
/// Availability queries fan out over many days and would otherwise re-read
/// the schedule for each one. The cache is owned by the service that uses
/// it and consults an injected clock, so expiry is testable and no state
/// outlives the service.
pub struct RuleCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entry: Mutex<Option<CacheEntry>>,
}

impl RuleCache {
    pub fn new(ttl_secs: i64, clock: Arc<dyn Clock>) -> Self {
        RuleCache {
            ttl: Duration::seconds(ttl_secs.max(0)),
            clock,
            entry: Mutex::new(None),
        }
    }

    /// The cached rules, if present and fresh.
    pub fn get(&self) -> Option<Vec<ScheduleRule>> {
        let guard = self.entry.lock().ok()?;
        let entry = guard.as_ref()?;
        if self.clock.now() - entry.loaded_at >= self.ttl {
            return None;
        }
        Some(entry.rules.clone())
    }

    pub fn put(&self, rules: Vec<ScheduleRule>) {
        if let Ok(mut guard) = self.entry.lock() {
            *guard = Some(CacheEntry {
                loaded_at: self.clock.now(),
                rules,
            });
        }
    }

    /// Drops the cached rules. Called after a schedule save so the next
    /// availability query sees the new rules immediately.
    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.entry.lock() {
            *guard = None;
        }
    }
}
