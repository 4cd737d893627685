use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, Utc};
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};

use kabinet_core::models::{BookingRecord, BookingStatus};
use kabinet_core::store::{BookingStore, InsertOutcome};
use kabinet_core::time::{day_start, parse_iso_utc};

use crate::models::DbBooking;

const BOOKING_COLUMNS: &str = "id, user_id, name, phone, slot_id, start_time, end_time, \
                               location, session_type, status, price, created_at";

/// Postgres-backed booking store.
#[derive(Clone)]
pub struct PgBookingStore {
    pool: Pool<Postgres>,
}

impl PgBookingStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PgBookingStore { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
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
        let rows = sqlx::query_as::<_, DbBooking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE start_time >= $1 AND start_time < $2
            ORDER BY start_time ASC
            "#,
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DbBooking::into_record).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<BookingRecord>> {
        let row = sqlx::query_as::<_, DbBooking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DbBooking::into_record))
    }

    async fn get_by_user(&self, user_id: &str) -> Result<Vec<BookingRecord>> {
        let rows = sqlx::query_as::<_, DbBooking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE user_id = $1
            ORDER BY start_time ASC
            "#,
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DbBooking::into_record).collect())
    }

    async fn get_all(&self) -> Result<Vec<BookingRecord>> {
        let rows = sqlx::query_as::<_, DbBooking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            ORDER BY start_time ASC
            "#,
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DbBooking::into_record).collect())
    }

    async fn insert_if_free(
        &self,
        record: BookingRecord,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<InsertOutcome> {
        let start = parse_iso_utc(&record.start)
            .ok_or_else(|| eyre!("unparsable booking start: {}", record.start))?;
        let end = parse_iso_utc(&record.end)
            .ok_or_else(|| eyre!("unparsable booking end: {}", record.end))?;
        let created_at = record
            .created_at
            .as_deref()
            .and_then(parse_iso_utc)
            .unwrap_or_else(Utc::now);

        let mut tx = self.pool.begin().await?;

        // Lock the bookings that start inside the candidate window; a
        // competing insert for the same window blocks here until we commit.
        let conflicts = sqlx::query_as::<_, DbBooking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE start_time >= $1 AND start_time < $2
            FOR UPDATE
            "#,
        ))
        .bind(window_start)
        .bind(window_end)
        .fetch_all(&mut *tx)
        .await?;

        let occupied = conflicts
            .iter()
            .any(|row| row.start_time.max(start) < row.end_time.min(end));
        if occupied {
            tx.rollback().await?;
            return Ok(InsertOutcome::Conflict);
        }

        sqlx::query(
            r#"
            INSERT INTO bookings
                (id, user_id, name, phone, slot_id, start_time, end_time,
                 location, session_type, status, price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(&record.id)
        .bind(&record.user_id)
        .bind(&record.name)
        .bind(&record.phone)
        .bind(&record.slot_id)
        .bind(start)
        .bind(end)
        .bind(&record.location)
        .bind(&record.session_type)
        .bind(record.status.as_str())
        .bind(record.price as i32)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(InsertOutcome::Inserted)
    }

    async fn patch_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<Option<BookingRecord>> {
        let row = sqlx::query_as::<_, DbBooking>(&format!(
            r#"
            UPDATE bookings
            SET status = $2
            WHERE id = $1
            RETURNING {BOOKING_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DbBooking::into_record))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
