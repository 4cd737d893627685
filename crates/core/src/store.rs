//! Storage traits implemented by `kabinet-db`.
//!
//! The engine only sees these traits; Postgres and the in-memory test
//! stores are interchangeable behind them. All methods return
//! `eyre::Result` so backends can attach whatever context they have.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use eyre::Result;

use crate::models::{BookingRecord, BookingStatus, ScheduleRule};

/// Outcome of an atomic conflict-check-and-insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The booking was persisted.
    Inserted,
    /// An overlapping booking already existed; nothing was written.
    Conflict,
}

/// Persistence for schedule rules.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// All live (non-tombstoned) rules.
    async fn get_all(&self) -> Result<Vec<ScheduleRule>>;

    /// Selective save: upserts every non-tombstoned rule in `rules` and
    /// removes the ones flagged `deleted`. Rules absent from `rules` are
    /// left untouched.
    async fn save(&self, rules: Vec<ScheduleRule>) -> Result<()>;
}

/// Persistence for bookings.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Bookings whose start falls on `date`.
    async fn get_for_date(&self, date: NaiveDate) -> Result<Vec<BookingRecord>>;

    /// Bookings whose start falls within `[from, to)`.
    ///
    /// Start-anchored on purpose: a booking that begins before `from` and
    /// spills into the window is not returned.
    async fn get_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<BookingRecord>>;

    async fn get_by_id(&self, id: &str) -> Result<Option<BookingRecord>>;

    async fn get_by_user(&self, user_id: &str) -> Result<Vec<BookingRecord>>;

    async fn get_all(&self) -> Result<Vec<BookingRecord>>;

    /// Atomically checks `[window_start, window_end)` for overlapping
    /// bookings and inserts `record` only if the window is free.
    async fn insert_if_free(
        &self,
        record: BookingRecord,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<InsertOutcome>;

    /// Updates the status of an existing booking. Returns the updated
    /// record, or `None` when no booking has that id.
    async fn patch_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<Option<BookingRecord>>;

    /// Removes a booking. Returns whether a record was actually removed.
    async fn delete(&self, id: &str) -> Result<bool>;
}
