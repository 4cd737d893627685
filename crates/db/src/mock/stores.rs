//! In-memory store implementations used by tests and local development.
//!
//! Bookings are kept as the same string-timestamp records the engine
//! consumes; range queries compare ISO strings lexicographically, which
//! orders correctly for well-formed UTC timestamps.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, Utc};
use eyre::Result;
use tokio::sync::Mutex;

use kabinet_core::models::{BookingRecord, BookingStatus, ScheduleRule};
use kabinet_core::store::{BookingStore, InsertOutcome, RuleStore};
use kabinet_core::time::{day_start, parse_iso_utc, to_iso_z};

#[derive(Default)]
pub struct InMemoryBookingStore {
    records: Mutex<Vec<BookingRecord>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store, bypassing the conflict check. Useful for
    /// seeding scenarios, including deliberately malformed records.
    pub async fn seed(&self, records: Vec<BookingRecord>) {
        self.records.lock().await.extend(records);
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

fn in_range(record: &BookingRecord, from: &str, to: &str) -> bool {
    record.start.as_str() >= from && record.start.as_str() < to
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn get_for_date(&self, date: NaiveDate) -> Result<Vec<BookingRecord>> {
        let from = day_start(date);
        let to = day_start(date.checked_add_days(Days::new(1)).unwrap_or(date));
        self.get_range(from, to).await
    }

    async fn get_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<BookingRecord>> {
        let from = to_iso_z(from);
        let to = to_iso_z(to);
        let mut matching: Vec<_> = self
            .records
            .lock()
            .await
            .iter()
            .filter(|record| in_range(record, &from, &to))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.start.cmp(&b.start));
        Ok(matching)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<BookingRecord>> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned())
    }

    async fn get_by_user(&self, user_id: &str) -> Result<Vec<BookingRecord>> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_all(&self) -> Result<Vec<BookingRecord>> {
        Ok(self.records.lock().await.clone())
    }

    async fn insert_if_free(
        &self,
        record: BookingRecord,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<InsertOutcome> {
        // One lock across check and insert keeps the operation atomic.
        let mut records = self.records.lock().await;
        let occupied = records.iter().any(|existing| {
            match (parse_iso_utc(&existing.start), parse_iso_utc(&existing.end)) {
                (Some(start), Some(end)) => start.max(window_start) < end.min(window_end),
                _ => false,
            }
        });
        if occupied {
            return Ok(InsertOutcome::Conflict);
        }
        records.push(record);
        Ok(InsertOutcome::Inserted)
    }

    async fn patch_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<Option<BookingRecord>> {
        let mut records = self.records.lock().await;
        match records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.status = status;
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|record| record.id != id);
        Ok(records.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryRuleStore {
    rules: Mutex<HashMap<String, ScheduleRule>>,
}

impl InMemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_rules(rules: Vec<ScheduleRule>) -> Self {
        let store = Self::new();
        store
            .save(rules)
            .await
            .unwrap_or_else(|_| unreachable!("in-memory save is infallible"));
        store
    }
}

#[async_trait]
impl RuleStore for InMemoryRuleStore {
    async fn get_all(&self) -> Result<Vec<ScheduleRule>> {
        let rules = self.rules.lock().await;
        let mut all: Vec<_> = rules
            .iter()
            .map(|(id, rule)| {
                let mut rule = rule.clone();
                rule.id = Some(id.clone());
                rule
            })
            .collect();
        all.sort_by(|a, b| (&a.date, &a.start).cmp(&(&b.date, &b.start)));
        Ok(all)
    }

    async fn save(&self, incoming: Vec<ScheduleRule>) -> Result<()> {
        let mut rules = self.rules.lock().await;
        for rule in incoming {
            let storage_id = rule.storage_id();
            if rule.deleted {
                rules.remove(&storage_id);
            } else {
                rules.insert(storage_id, rule);
            }
        }
        Ok(())
    }
}
