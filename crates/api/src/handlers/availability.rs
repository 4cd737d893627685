//! # Availability Handlers
//!
//! Handlers for querying bookable slots and dates. Slots are derived from
//! the provider's schedule rules at request time and never persisted:
//!
//! 1. Schedule rules are loaded (through a short-lived cache)
//! 2. Rules matching the date, session type, and location are resolved to
//!    concrete windows
//! 3. Each window is stepped through, dropping candidates that collide
//!    with existing bookings or lie in the past
//!
//! The date picker endpoint performs the same resolution across a 30-day
//! horizon, fetching the bookings for the whole window in one query and
//! stopping at the first free slot per day.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use kabinet_core::errors::EngineError;
use kabinet_core::models::Slot;
use kabinet_core::normalize::SessionCategory;
use kabinet_core::time::{parse_rule_date, to_iso_z};

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the slot listing endpoint
///
/// # Fields
///
/// * `date` - Day to list slots for, `dd-mm-yy`
/// * `session_type` - Requested session type label (default: in-person)
/// * `location` - Client-selected location label (optional)
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    /// Day to list slots for, `dd-mm-yy`
    pub date: String,

    /// Requested session type label
    pub session_type: Option<String>,

    /// Client-selected location label
    pub location: Option<String>,
}

/// Query parameters for the date picker endpoint
#[derive(Debug, Deserialize)]
pub struct DatesQuery {
    /// Requested session type label
    pub session_type: Option<String>,

    /// Client-selected location label
    pub location: Option<String>,
}

/// A bookable slot as returned over HTTP, timestamps in ISO-8601 UTC
#[derive(Debug, Serialize)]
pub struct SlotDto {
    pub id: String,
    pub start: String,
    pub end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub session_type: String,
}

impl From<Slot> for SlotDto {
    fn from(slot: Slot) -> Self {
        SlotDto {
            id: slot.id,
            start: to_iso_z(slot.start),
            end: to_iso_z(slot.end),
            location: slot.location,
            session_type: slot.session_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub slots: Vec<SlotDto>,
}

#[derive(Debug, Serialize)]
pub struct DatesResponse {
    pub dates: Vec<String>,
}

/// Lists the free slots on a given day
///
/// # Endpoint
///
/// `GET /api/slots?date=01-06-25&session_type=online&location=...`
///
/// # Errors
///
/// * `EngineError::Validation` - Malformed `date` parameter
/// * `EngineError::Database` - Storage failure
#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let date = parse_rule_date(&query.date).ok_or_else(|| {
        AppError(EngineError::Validation(format!(
            "Invalid date: {} (expected dd-mm-yy)",
            query.date
        )))
    })?;
    let requested = SessionCategory::from_label(query.session_type.as_deref().unwrap_or(""));

    let slots = state
        .availability
        .list_available_slots(date, requested, query.location.as_deref())
        .await?;

    Ok(Json(SlotsResponse {
        slots: slots.into_iter().map(SlotDto::from).collect(),
    }))
}

/// Lists the dates within the next 30 days that still have free slots
///
/// # Endpoint
///
/// `GET /api/slots/dates?session_type=online&location=...`
#[axum::debug_handler]
pub async fn list_dates(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DatesQuery>,
) -> Result<Json<DatesResponse>, AppError> {
    let requested = SessionCategory::from_label(query.session_type.as_deref().unwrap_or(""));

    let dates = state
        .availability
        .available_dates(requested, query.location.as_deref())
        .await?;

    Ok(Json(DatesResponse { dates }))
}
