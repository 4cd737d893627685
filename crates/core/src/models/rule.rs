use serde::{Deserialize, Serialize};

/// One row of the provider's schedule: a bookable (or blacked-out) window
/// on a single date.
///
/// Fields mirror what the schedule editor submits. Times are loose `HH:MM`
/// strings and the date is a `dd-mm-yy` key; normalization happens at
/// matching time so that a malformed rule degrades instead of poisoning the
/// whole schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRule {
    /// Storage identity. `None` for rules that have never been persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `dd-mm-yy` date the window applies to.
    pub date: String,
    /// Window opening time, loose `HH:MM`.
    #[serde(default)]
    pub start: String,
    /// Window closing time, loose `HH:MM`.
    #[serde(default)]
    pub end: String,
    /// Session length in minutes. `None` or `0` falls back to the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Step between successive slot starts, minutes. Defaults to `duration`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    /// Free-text location label.
    #[serde(default)]
    pub location: String,
    /// Free-text session-type label.
    #[serde(default)]
    pub session_type: String,
    /// Tombstone flag set by the schedule editor to remove a rule.
    #[serde(default)]
    pub deleted: bool,
}

impl ScheduleRule {
    /// Deterministic identity derived from the fields that make a rule
    /// unique within a schedule. Used as the storage key so that saving the
    /// same window twice overwrites instead of duplicating.
    pub fn composite_id(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.date.trim(),
            self.start.trim(),
            self.location.trim(),
            self.session_type.trim()
        )
    }

    /// The identity to persist under: the stored id when present,
    /// otherwise the composite id.
    pub fn storage_id(&self) -> String {
        self.id
            .as_deref()
            .map(str::to_string)
            .unwrap_or_else(|| self.composite_id())
    }
}
