//! # Admin Handlers
//!
//! Provider-side operations: full booking listing, unconditional booking
//! removal, and schedule management. Transport-level authentication for
//! these routes is expected to live in front of this service.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use kabinet_core::models::{AdminDeleteReceipt, BookingRecord, ScheduleRule};

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Serialize)]
pub struct AllBookingsResponse {
    pub bookings: Vec<BookingRecord>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub rules: Vec<ScheduleRule>,
}

#[derive(Debug, Deserialize)]
pub struct SaveScheduleRequest {
    pub rules: Vec<ScheduleRule>,
}

#[derive(Debug, Serialize)]
pub struct SaveScheduleResponse {
    pub saved: usize,
}

/// Lists every booking in the system
///
/// # Endpoint
///
/// `GET /api/admin/bookings`
#[axum::debug_handler]
pub async fn list_all_bookings(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<AllBookingsResponse>, AppError> {
    let bookings = state.reservations.list_all_bookings().await?;
    Ok(Json(AllBookingsResponse { bookings }))
}

/// Removes a booking without the client-side lead-time gate
///
/// # Endpoint
///
/// `DELETE /api/admin/bookings/:id`
///
/// # Errors
///
/// * `EngineError::NotFound` - No booking with that id
#[axum::debug_handler]
pub async fn delete_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<AdminDeleteReceipt>, AppError> {
    let receipt = state.reservations.admin_delete_booking(&id).await?;
    Ok(Json(receipt))
}

/// Returns the full schedule
///
/// # Endpoint
///
/// `GET /api/admin/schedule`
#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let rules = state.rules.get_all().await.map_err(AppError::from)?;
    Ok(Json(ScheduleResponse { rules }))
}

/// Saves schedule rules
///
/// # Endpoint
///
/// `PUT /api/admin/schedule`
///
/// The save is selective: submitted rules are upserted, rules flagged
/// `deleted` are removed, and rules absent from the payload are left
/// untouched. The rule cache is invalidated so the next availability
/// query sees the new schedule.
#[axum::debug_handler]
pub async fn save_schedule(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SaveScheduleRequest>,
) -> Result<Json<SaveScheduleResponse>, AppError> {
    let saved = request.rules.len();
    state.rules.save(request.rules).await.map_err(AppError::from)?;
    state.availability.invalidate_rules();
    Ok(Json(SaveScheduleResponse { saved }))
}
