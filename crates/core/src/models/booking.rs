use serde::{Deserialize, Serialize};

/// Price charged when a booking request does not specify one.
pub const DEFAULT_PRICE: u32 = 100;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created, waiting for payment confirmation.
    PendingPayment,
    /// Payment confirmed.
    Confirmed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::PendingPayment => "pending_payment",
            BookingStatus::Confirmed => "confirmed",
        }
    }
}

/// A persisted booking.
///
/// Timestamps cross the store boundary as UTC ISO-8601 strings with a `Z`
/// suffix; consumers parse them on demand and skip records they cannot
/// parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Identity of the slot this booking was made for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<String>,
    /// Session start, ISO-8601 UTC.
    pub start: String,
    /// Session end, ISO-8601 UTC.
    pub end: String,
    /// `None` for online sessions, the address otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_type: Option<String>,
    pub status: BookingStatus,
    pub price: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Payload for creating a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Session start, ISO-8601 UTC.
    pub start: String,
    /// Session end, ISO-8601 UTC.
    pub end: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub session_type: Option<String>,
    #[serde(default)]
    pub price: Option<u32>,
}

/// Returned to the caller after a successful cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancellationReceipt {
    pub id: String,
    /// Always `"canceled"`.
    pub status: String,
    pub canceled_at: String,
}

/// Returned to the caller after an administrative deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminDeleteReceipt {
    pub id: String,
    /// Always `"deleted"`.
    pub status: String,
    pub deleted_at: String,
}
