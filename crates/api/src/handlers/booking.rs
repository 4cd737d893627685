//! # Booking Handlers
//!
//! Client-facing booking lifecycle: creation, payment confirmation,
//! cancellation, and per-user listing. All state transitions go through
//! the reservation service; handlers only translate between HTTP and the
//! engine.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use kabinet_core::models::{BookingRecord, CancellationReceipt, CreateBookingRequest};

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Deserialize)]
pub struct UserBookingsQuery {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct BookingsResponse {
    pub bookings: Vec<BookingRecord>,
}

/// Creates a pending booking
///
/// # Endpoint
///
/// `POST /api/bookings`
///
/// The request carries the slot window as ISO-8601 UTC timestamps. The
/// conflict check and the insert are atomic, so a window can never be
/// double-booked.
///
/// # Errors
///
/// * `EngineError::Validation` - Malformed timestamps, inverted window, or
///   the slot is already booked
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingRecord>), AppError> {
    let record = state.reservations.create_reservation(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Marks a pending booking as paid
///
/// # Endpoint
///
/// `POST /api/bookings/:id/confirm`
///
/// # Errors
///
/// * `EngineError::NotFound` - No booking with that id
#[axum::debug_handler]
pub async fn confirm_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<BookingRecord>, AppError> {
    let record = state.reservations.confirm_payment(&id).await?;
    Ok(Json(record))
}

/// Cancels a booking on behalf of the client
///
/// # Endpoint
///
/// `DELETE /api/bookings/:id`
///
/// # Errors
///
/// * `EngineError::NotFound` - No booking with that id
/// * `EngineError::PolicyViolation` - The session starts in less than 24 hours
#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<CancellationReceipt>, AppError> {
    let receipt = state.reservations.cancel_booking(&id).await?;
    Ok(Json(receipt))
}

/// Lists the bookings of a single user
///
/// # Endpoint
///
/// `GET /api/bookings?user_id=...`
#[axum::debug_handler]
pub async fn list_user_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<UserBookingsQuery>,
) -> Result<Json<BookingsResponse>, AppError> {
    let bookings = state.reservations.list_user_bookings(&query.user_id).await?;
    Ok(Json(BookingsResponse { bookings }))
}
