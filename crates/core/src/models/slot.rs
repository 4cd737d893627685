use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::time::to_iso_z;

/// A concrete bookable window offered to a client.
///
/// Slots are ephemeral: they are derived from schedule rules on every
/// availability query and never persisted. The id is deterministic so the
/// same offer always carries the same identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `None` for online sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub session_type: String,
}

impl Slot {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        location: Option<String>,
        session_type: String,
    ) -> Self {
        let id = derive_slot_id(start, location.as_deref(), &session_type);
        Slot {
            id,
            start,
            end,
            location,
            session_type,
        }
    }
}

/// Deterministic slot identity: start instant, location (or `online`), and
/// session type.
pub fn derive_slot_id(
    start: DateTime<Utc>,
    location: Option<&str>,
    session_type: &str,
) -> String {
    format!(
        "{}|{}|{}",
        to_iso_z(start),
        location.unwrap_or("online"),
        session_type
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn slot_id_is_deterministic() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 1, 9, 50, 0).unwrap();
        let a = Slot::new(start, end, Some("ул. Ленина 5".into()), "offline".into());
        let b = Slot::new(start, end, Some("ул. Ленина 5".into()), "offline".into());
        assert_eq!(a.id, b.id);
        assert_eq!(a.id, "2025-06-01T09:00:00Z|ул. Ленина 5|offline");
    }

    #[test]
    fn online_slot_id_uses_online_marker() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 1, 9, 50, 0).unwrap();
        let slot = Slot::new(start, end, None, "online".into());
        assert_eq!(slot.id, "2025-06-01T09:00:00Z|online|online");
    }
}
