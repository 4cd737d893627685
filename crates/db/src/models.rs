use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kabinet_core::models::{BookingRecord, BookingStatus, ScheduleRule};
use kabinet_core::time::to_iso_z;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: String,
    pub user_id: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub slot_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub session_type: Option<String>,
    pub status: String,
    pub price: i32,
    pub created_at: DateTime<Utc>,
}

impl DbBooking {
    /// Converts a typed row into the string-timestamp record the engine
    /// consumes.
    pub fn into_record(self) -> BookingRecord {
        BookingRecord {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            phone: self.phone,
            slot_id: self.slot_id,
            start: to_iso_z(self.start_time),
            end: to_iso_z(self.end_time),
            location: self.location,
            session_type: self.session_type,
            status: parse_status(&self.status),
            price: self.price.max(0) as u32,
            created_at: Some(to_iso_z(self.created_at)),
        }
    }
}

fn parse_status(raw: &str) -> BookingStatus {
    match raw {
        "confirmed" => BookingStatus::Confirmed,
        _ => BookingStatus::PendingPayment,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleRule {
    pub id: String,
    pub rule_date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: Option<i32>,
    pub slot_interval: Option<i32>,
    pub location: String,
    pub session_type: String,
    pub created_at: DateTime<Utc>,
}

impl DbScheduleRule {
    pub fn into_rule(self) -> ScheduleRule {
        ScheduleRule {
            id: Some(self.id),
            date: self.rule_date,
            start: self.start_time,
            end: self.end_time,
            duration: self.duration.and_then(|d| u32::try_from(d).ok()),
            interval: self.slot_interval.and_then(|i| u32::try_from(i).ok()),
            location: self.location,
            session_type: self.session_type,
            deleted: false,
        }
    }
}
