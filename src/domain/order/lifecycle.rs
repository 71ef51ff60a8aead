//! Order lifecycle classification and action gating.
//!
//! The single place that turns a raw brokerage status string into a
//! [`LifecyclePhase`], a display [`BadgeCategory`], and a cancel decision.
//! Everything here is a pure read-side function; records are never mutated.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

lazy_static! {
    static ref OPEN_STATUSES: HashSet<&'static str> = [
        "new",
        "accepted",
        "pending_new",
        "accepted_for_bidding",
        "held",
        "partially_filled",
    ]
    .into_iter()
    .collect();

    static ref CLOSED_STATUSES: HashSet<&'static str> = [
        "filled",
        "canceled",
        "expired",
        "rejected",
        "suspended",
        "done_for_day",
    ]
    .into_iter()
    .collect();
}

/// Status written locally after a confirmed cancel.
pub const CANCELED_STATUS: &str = "canceled";

/// Client-observed lifecycle phase of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecyclePhase {
    Open,
    Closed,
    /// Missing or unrecognised status. Never guessed into open or closed.
    Unknown,
}

impl LifecyclePhase {
    pub fn classify(status: Option<&str>) -> Self {
        let Some(raw) = status else {
            return LifecyclePhase::Unknown;
        };
        let normalized = normalize(raw);
        if OPEN_STATUSES.contains(normalized.as_str()) {
            LifecyclePhase::Open
        } else if CLOSED_STATUSES.contains(normalized.as_str()) {
            LifecyclePhase::Closed
        } else {
            LifecyclePhase::Unknown
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, LifecyclePhase::Open)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecyclePhase::Closed)
    }

    /// Whether a held record in phase `self` may move to phase `next`.
    ///
    /// Closed is terminal; a recognised phase never falls back to unknown.
    pub fn can_transition_to(&self, next: LifecyclePhase) -> bool {
        match (self, next) {
            (LifecyclePhase::Unknown, _) => true,
            (LifecyclePhase::Open, LifecyclePhase::Open | LifecyclePhase::Closed) => true,
            (LifecyclePhase::Closed, LifecyclePhase::Closed) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LifecyclePhase::Open => write!(f, "Open"),
            LifecyclePhase::Closed => write!(f, "Closed"),
            LifecyclePhase::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Theme-neutral badge tag for a status or trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Success,
    Warning,
    Info,
    Danger,
    Neutral,
}

impl BadgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeCategory::Success => "success",
            BadgeCategory::Warning => "warning",
            BadgeCategory::Info => "info",
            BadgeCategory::Danger => "danger",
            BadgeCategory::Neutral => "neutral",
        }
    }
}

pub fn classify(status: Option<&str>) -> LifecyclePhase {
    LifecyclePhase::classify(status)
}

/// True iff the status is in the open set.
pub fn is_cancellable(status: Option<&str>) -> bool {
    classify(status).is_open()
}

pub fn badge_category(status: Option<&str>) -> BadgeCategory {
    let Some(raw) = status else {
        return BadgeCategory::Neutral;
    };
    match normalize(raw).as_str() {
        "filled" => BadgeCategory::Success,
        "partially_filled" => BadgeCategory::Warning,
        "new" | "accepted" | "pending_new" => BadgeCategory::Info,
        "rejected" | "canceled" | "expired" => BadgeCategory::Danger,
        _ => BadgeCategory::Neutral,
    }
}

fn normalize(status: &str) -> String {
    status.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: [&str; 6] = [
        "new",
        "accepted",
        "pending_new",
        "accepted_for_bidding",
        "held",
        "partially_filled",
    ];
    const CLOSED: [&str; 6] = [
        "filled",
        "canceled",
        "expired",
        "rejected",
        "suspended",
        "done_for_day",
    ];

    #[test]
    fn test_open_statuses_are_cancellable() {
        for status in OPEN {
            assert_eq!(classify(Some(status)), LifecyclePhase::Open, "{status}");
            assert!(is_cancellable(Some(status)), "{status}");
        }
    }

    #[test]
    fn test_closed_statuses_are_not_cancellable() {
        for status in CLOSED {
            assert_eq!(classify(Some(status)), LifecyclePhase::Closed, "{status}");
            assert!(!is_cancellable(Some(status)), "{status}");
        }
    }

    #[test]
    fn test_unrecognised_statuses_are_unknown() {
        for status in [Some(""), Some("replaced"), Some("pending_cancel"), None] {
            assert_eq!(classify(status), LifecyclePhase::Unknown);
            assert!(!is_cancellable(status));
            assert_eq!(badge_category(status), BadgeCategory::Neutral);
        }
    }

    #[test]
    fn test_classification_ignores_case_and_padding() {
        assert_eq!(classify(Some(" FILLED ")), LifecyclePhase::Closed);
        assert_eq!(classify(Some("Partially_Filled")), LifecyclePhase::Open);
    }

    #[test]
    fn test_badge_categories() {
        assert_eq!(badge_category(Some("filled")), BadgeCategory::Success);
        assert_eq!(badge_category(Some("partially_filled")), BadgeCategory::Warning);
        for s in ["new", "accepted", "pending_new"] {
            assert_eq!(badge_category(Some(s)), BadgeCategory::Info);
        }
        for s in ["rejected", "canceled", "expired"] {
            assert_eq!(badge_category(Some(s)), BadgeCategory::Danger);
        }
        assert_eq!(badge_category(Some("held")), BadgeCategory::Neutral);
    }

    #[test]
    fn test_closed_is_terminal() {
        assert!(!LifecyclePhase::Closed.can_transition_to(LifecyclePhase::Open));
        assert!(!LifecyclePhase::Closed.can_transition_to(LifecyclePhase::Unknown));
        assert!(LifecyclePhase::Closed.can_transition_to(LifecyclePhase::Closed));
    }

    #[test]
    fn test_recognised_never_returns_to_unknown() {
        assert!(!LifecyclePhase::Open.can_transition_to(LifecyclePhase::Unknown));
        assert!(LifecyclePhase::Open.can_transition_to(LifecyclePhase::Closed));
        assert!(LifecyclePhase::Unknown.can_transition_to(LifecyclePhase::Open));
        assert!(LifecyclePhase::Unknown.can_transition_to(LifecyclePhase::Closed));
    }
}
