#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};

use kabinet_api::{router, ApiState};
use kabinet_core::clock::{Clock, FixedClock};
use kabinet_core::models::ScheduleRule;
use kabinet_core::store::{BookingStore, RuleStore};
use kabinet_db::mock::{InMemoryBookingStore, InMemoryRuleStore};

pub const CACHE_TTL_SECS: i64 = 5;

/// Test harness: in-memory stores and a fixed clock behind the real router.
pub struct TestContext {
    pub rules: Arc<InMemoryRuleStore>,
    pub bookings: Arc<InMemoryBookingStore>,
    pub now: DateTime<Utc>,
}

impl TestContext {
    /// A context whose clock sits well before the scenario dates used in
    /// these tests (June 2025), so lead-time gates stay open.
    pub fn new() -> Self {
        Self::at(Utc.with_ymd_and_hms(2025, 5, 20, 8, 0, 0).unwrap())
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        TestContext {
            rules: Arc::new(InMemoryRuleStore::new()),
            bookings: Arc::new(InMemoryBookingStore::new()),
            now,
        }
    }

    pub async fn seed_rules(&self, rules: Vec<ScheduleRule>) {
        self.rules
            .save(rules)
            .await
            .expect("in-memory rule save cannot fail");
    }

    pub fn state(&self) -> Arc<ApiState> {
        let rules: Arc<dyn RuleStore> = self.rules.clone();
        let bookings: Arc<dyn BookingStore> = self.bookings.clone();
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(self.now));
        Arc::new(ApiState::new(rules, bookings, clock, CACHE_TTL_SECS))
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(router(self.state())).expect("test server should start")
    }
}

pub fn rule(date: &str, start: &str, end: &str, session_type: &str) -> ScheduleRule {
    ScheduleRule {
        id: None,
        date: date.into(),
        start: start.into(),
        end: end.into(),
        duration: Some(60),
        interval: None,
        location: String::new(),
        session_type: session_type.into(),
        deleted: false,
    }
}

pub fn booking_payload(user_id: &str, start: &str, end: &str) -> serde_json::Value {
    serde_json::json!({
        "user_id": user_id,
        "name": "Test Client",
        "start": start,
        "end": end,
        "session_type": "online",
    })
}
