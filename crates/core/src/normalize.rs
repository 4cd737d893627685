//! Normalization of free-text session types and locations.
//!
//! Rules and booking requests arrive with labels typed by humans in either
//! Russian or English. Each label is trimmed, lowercased, and looked up in
//! an explicit synonym table; there is no substring matching.

/// Canonical session category of a rule or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionCategory {
    /// Rule-side wildcard: the window serves every session type.
    Any,
    Online,
    Offline,
    /// Sand therapy. Always in-person; collapses to `Offline` for window
    /// matching but is kept distinct on bookings.
    Sand,
    /// Blackout marker: the window is reserved time, nothing is bookable.
    Rest,
}

const SESSION_SYNONYMS: &[(&str, SessionCategory)] = &[
    ("any", SessionCategory::Any),
    ("both", SessionCategory::Any),
    ("оба", SessionCategory::Any),
    ("любой", SessionCategory::Any),
    ("все", SessionCategory::Any),
    ("online", SessionCategory::Online),
    ("онлайн", SessionCategory::Online),
    ("rest", SessionCategory::Rest),
    ("отдых", SessionCategory::Rest),
    ("остальное", SessionCategory::Rest),
    ("sand", SessionCategory::Sand),
    ("песочная терапия", SessionCategory::Sand),
    ("песочница", SessionCategory::Sand),
    ("offline", SessionCategory::Offline),
    ("офлайн", SessionCategory::Offline),
    ("оффлайн", SessionCategory::Offline),
    ("очно", SessionCategory::Offline),
];

impl SessionCategory {
    /// Maps a free-text label to its category. Unknown or empty labels are
    /// treated as in-person sessions.
    pub fn from_label(label: &str) -> Self {
        let needle = label.trim().to_lowercase();
        SESSION_SYNONYMS
            .iter()
            .find(|(synonym, _)| *synonym == needle)
            .map(|(_, category)| *category)
            .unwrap_or(SessionCategory::Offline)
    }

    /// Whether a window of this category serves a `requested` session.
    ///
    /// `Rest` serves nothing, `Any` serves everything, `Online` serves only
    /// online requests, and the in-person categories (`Offline`, `Sand`)
    /// serve every non-online request.
    pub fn allows(self, requested: SessionCategory) -> bool {
        match self {
            SessionCategory::Rest => false,
            SessionCategory::Any => true,
            SessionCategory::Online => requested == SessionCategory::Online,
            SessionCategory::Offline | SessionCategory::Sand => {
                requested != SessionCategory::Online
            }
        }
    }

    pub fn is_online(self) -> bool {
        self == SessionCategory::Online
    }

    /// Canonical English label, used on slots handed back to clients.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionCategory::Any => "any",
            SessionCategory::Online => "online",
            SessionCategory::Offline => "offline",
            SessionCategory::Sand => "sand",
            SessionCategory::Rest => "rest",
        }
    }
}

/// Where a rule's window takes place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationRule {
    /// Wildcard: the window applies at every location.
    Any,
    /// The window is online only.
    Online,
    /// The window applies only at this exact (trimmed) address.
    Exact(String),
}

const WILDCARD_LOCATIONS: &[&str] = &["any", "любой", "все", "везде"];
const ONLINE_LOCATIONS: &[&str] = &["online", "онлайн"];

impl LocationRule {
    /// Maps a free-text location label to a rule. Empty labels are
    /// wildcards; anything unrecognized is an exact address.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return LocationRule::Any;
        }
        let needle = trimmed.to_lowercase();
        if WILDCARD_LOCATIONS.contains(&needle.as_str()) {
            return LocationRule::Any;
        }
        if ONLINE_LOCATIONS.contains(&needle.as_str()) {
            return LocationRule::Online;
        }
        LocationRule::Exact(trimmed.to_string())
    }

    /// Whether the rule admits a client-selected location. `None` means the
    /// client did not restrict the location.
    pub fn admits(&self, selected: Option<&str>) -> bool {
        match (self, selected) {
            (_, None) => true,
            (LocationRule::Any, Some(_)) => true,
            (LocationRule::Online, Some(sel)) => {
                ONLINE_LOCATIONS.contains(&sel.trim().to_lowercase().as_str())
            }
            (LocationRule::Exact(addr), Some(sel)) => addr == sel.trim(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("any", SessionCategory::Any)]
    #[case("Оба", SessionCategory::Any)]
    #[case(" online ", SessionCategory::Online)]
    #[case("ОНЛАЙН", SessionCategory::Online)]
    #[case("Песочная терапия", SessionCategory::Sand)]
    #[case("отдых", SessionCategory::Rest)]
    #[case("очно", SessionCategory::Offline)]
    #[case("", SessionCategory::Offline)]
    #[case("что-то странное", SessionCategory::Offline)]
    fn session_labels_normalize(#[case] label: &str, #[case] expected: SessionCategory) {
        assert_eq!(SessionCategory::from_label(label), expected);
    }

    #[test]
    fn rest_windows_serve_nothing() {
        assert!(!SessionCategory::Rest.allows(SessionCategory::Online));
        assert!(!SessionCategory::Rest.allows(SessionCategory::Offline));
        assert!(!SessionCategory::Rest.allows(SessionCategory::Any));
    }

    #[test]
    fn any_windows_serve_everything() {
        assert!(SessionCategory::Any.allows(SessionCategory::Online));
        assert!(SessionCategory::Any.allows(SessionCategory::Offline));
        assert!(SessionCategory::Any.allows(SessionCategory::Sand));
    }

    #[test]
    fn in_person_windows_reject_online_requests() {
        assert!(!SessionCategory::Offline.allows(SessionCategory::Online));
        assert!(!SessionCategory::Sand.allows(SessionCategory::Online));
        assert!(SessionCategory::Offline.allows(SessionCategory::Sand));
        assert!(SessionCategory::Sand.allows(SessionCategory::Offline));
    }

    #[rstest]
    #[case("", LocationRule::Any)]
    #[case("любой", LocationRule::Any)]
    #[case("ВЕЗДЕ", LocationRule::Any)]
    #[case("online", LocationRule::Online)]
    #[case("Онлайн", LocationRule::Online)]
    #[case("  ул. Ленина 5  ", LocationRule::Exact("ул. Ленина 5".into()))]
    fn location_labels_normalize(#[case] label: &str, #[case] expected: LocationRule) {
        assert_eq!(LocationRule::from_label(label), expected);
    }

    #[test]
    fn exact_location_admits_only_matching_selection() {
        let rule = LocationRule::Exact("ул. Ленина 5".into());
        assert!(rule.admits(None));
        assert!(rule.admits(Some(" ул. Ленина 5 ")));
        assert!(!rule.admits(Some("другой адрес")));
    }

    #[test]
    fn online_location_admits_online_selection_only() {
        let rule = LocationRule::Online;
        assert!(rule.admits(None));
        assert!(rule.admits(Some("Онлайн")));
        assert!(!rule.admits(Some("ул. Ленина 5")));
    }
}
