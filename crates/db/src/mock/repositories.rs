use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use mockall::mock;

use kabinet_core::models::{BookingRecord, BookingStatus, ScheduleRule};
use kabinet_core::store::{BookingStore, InsertOutcome, RuleStore};

// Mock stores for testing
mock! {
    pub Bookings {}

    #[async_trait]
    impl BookingStore for Bookings {
        async fn get_for_date(&self, date: NaiveDate) -> eyre::Result<Vec<BookingRecord>>;

        async fn get_range(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> eyre::Result<Vec<BookingRecord>>;

        async fn get_by_id(&self, id: &str) -> eyre::Result<Option<BookingRecord>>;

        async fn get_by_user(&self, user_id: &str) -> eyre::Result<Vec<BookingRecord>>;

        async fn get_all(&self) -> eyre::Result<Vec<BookingRecord>>;

        async fn insert_if_free(
            &self,
            record: BookingRecord,
            window_start: DateTime<Utc>,
            window_end: DateTime<Utc>,
        ) -> eyre::Result<InsertOutcome>;

        async fn patch_status(
            &self,
            id: &str,
            status: BookingStatus,
        ) -> eyre::Result<Option<BookingRecord>>;

        async fn delete(&self, id: &str) -> eyre::Result<bool>;
    }
}

mock! {
    pub Rules {}

    #[async_trait]
    impl RuleStore for Rules {
        async fn get_all(&self) -> eyre::Result<Vec<ScheduleRule>>;

        async fn save(&self, rules: Vec<ScheduleRule>) -> eyre::Result<()>;
    }
}
