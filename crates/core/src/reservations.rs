//! Booking lifecycle: create, confirm, cancel, and administrative removal.

use std::sync::Arc;

use chrono::Duration;
use tracing::info;
use uuid::Uuid;

use crate::clock::Clock;
use crate::errors::{EngineError, EngineResult};
use crate::models::{
    derive_slot_id, AdminDeleteReceipt, BookingRecord, BookingStatus, CancellationReceipt,
    CreateBookingRequest, DEFAULT_PRICE,
};
use crate::store::{BookingStore, InsertOutcome};
use crate::time::{parse_iso_utc, to_iso_z};

/// Minimum lead time for a client-initiated cancellation, hours.
pub const CANCELLATION_LEAD_HOURS: i64 = 24;

/// Write side of the engine: owns every booking state transition.
pub struct ReservationService {
    bookings: Arc<dyn BookingStore>,
    clock: Arc<dyn Clock>,
}

impl ReservationService {
    pub fn new(bookings: Arc<dyn BookingStore>, clock: Arc<dyn Clock>) -> Self {
        ReservationService { bookings, clock }
    }

    /// Creates a pending booking if the requested window is free.
    ///
    /// The conflict check and the insert happen atomically inside the
    /// store, so two clients racing for the same window cannot both win.
    pub async fn create_reservation(
        &self,
        request: CreateBookingRequest,
    ) -> EngineResult<BookingRecord> {
        let start = parse_iso_utc(&request.start)
            .ok_or_else(|| EngineError::Validation(format!("Invalid start time: {}", request.start)))?;
        let end = parse_iso_utc(&request.end)
            .ok_or_else(|| EngineError::Validation(format!("Invalid end time: {}", request.end)))?;
        if start >= end {
            return Err(EngineError::Validation(
                "Booking start must precede its end".into(),
            ));
        }

        let session_type = request.session_type.clone().unwrap_or_default();
        let slot_id = derive_slot_id(start, request.location.as_deref(), &session_type);
        let record = BookingRecord {
            id: Uuid::new_v4().to_string(),
            user_id: request.user_id,
            name: request.name,
            phone: request.phone,
            slot_id: Some(slot_id),
            start: to_iso_z(start),
            end: to_iso_z(end),
            location: request.location,
            session_type: request.session_type,
            status: BookingStatus::PendingPayment,
            price: request.price.unwrap_or(DEFAULT_PRICE),
            created_at: Some(to_iso_z(self.clock.now())),
        };

        match self.bookings.insert_if_free(record.clone(), start, end).await? {
            InsertOutcome::Inserted => {
                info!(booking_id = %record.id, user_id = %record.user_id, "booking created");
                Ok(record)
            }
            InsertOutcome::Conflict => {
                Err(EngineError::Validation("Slot already booked".into()))
            }
        }
    }

    /// Marks a pending booking as paid.
    pub async fn confirm_payment(&self, id: &str) -> EngineResult<BookingRecord> {
        let updated = self
            .bookings
            .patch_status(id, BookingStatus::Confirmed)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("booking {id}")))?;
        info!(booking_id = %id, "payment confirmed");
        Ok(updated)
    }

    /// Client-initiated cancellation, allowed only while the session is
    /// more than [`CANCELLATION_LEAD_HOURS`] away.
    pub async fn cancel_booking(&self, id: &str) -> EngineResult<CancellationReceipt> {
        let record = self
            .bookings
            .get_by_id(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("booking {id}")))?;
        let start = parse_iso_utc(&record.start)
            .ok_or_else(|| EngineError::NotFound(format!("booking {id}")))?;

        let now = self.clock.now();
        if start - now < Duration::hours(CANCELLATION_LEAD_HOURS) {
            return Err(EngineError::PolicyViolation(format!(
                "Bookings can only be canceled at least {CANCELLATION_LEAD_HOURS} hours in advance"
            )));
        }

        self.bookings.delete(id).await?;
        info!(booking_id = %id, "booking canceled");
        Ok(CancellationReceipt {
            id: id.to_string(),
            status: "canceled".into(),
            canceled_at: to_iso_z(now),
        })
    }

    /// Administrative removal. No lead-time gate.
    pub async fn admin_delete_booking(&self, id: &str) -> EngineResult<AdminDeleteReceipt> {
        if !self.bookings.delete(id).await? {
            return Err(EngineError::NotFound(format!("booking {id}")));
        }
        info!(booking_id = %id, "booking deleted by admin");
        Ok(AdminDeleteReceipt {
            id: id.to_string(),
            status: "deleted".into(),
            deleted_at: to_iso_z(self.clock.now()),
        })
    }

    pub async fn list_user_bookings(&self, user_id: &str) -> EngineResult<Vec<BookingRecord>> {
        Ok(self.bookings.get_by_user(user_id).await?)
    }

    pub async fn list_all_bookings(&self) -> EngineResult<Vec<BookingRecord>> {
        Ok(self.bookings.get_all().await?)
    }
}
