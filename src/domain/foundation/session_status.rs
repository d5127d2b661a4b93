//! SessionStatus enum for tracking lifecycle of mediation sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a mediation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Created; the partner has not joined yet.
    #[default]
    Waiting,
    /// Both participants may exchange messages.
    Active,
    /// Closed for good. No operation currently leads here.
    Completed,
}

impl SessionStatus {
    /// Returns true if a partner may still join.
    pub fn is_joinable(&self) -> bool {
        matches!(self, SessionStatus::Waiting)
    }

    /// Returns true if messages may be posted.
    pub fn accepts_messages(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }

    /// Returns the snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Waiting => "waiting",
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
        }
    }
}

impl StateMachine for SessionStatus {
    /// Valid transitions:
    /// - Waiting -> Active
    /// - Active -> Completed
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!((self, target), (Waiting, Active) | (Active, Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            Waiting => vec![Active],
            Active => vec![Completed],
            Completed => vec![],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Waiting => "Waiting",
            SessionStatus::Active => "Active",
            SessionStatus::Completed => "Completed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_waiting() {
        assert_eq!(SessionStatus::default(), SessionStatus::Waiting);
    }

    #[test]
    fn only_waiting_is_joinable() {
        assert!(SessionStatus::Waiting.is_joinable());
        assert!(!SessionStatus::Active.is_joinable());
        assert!(!SessionStatus::Completed.is_joinable());
    }

    #[test]
    fn only_active_accepts_messages() {
        assert!(!SessionStatus::Waiting.accepts_messages());
        assert!(SessionStatus::Active.accepts_messages());
        assert!(!SessionStatus::Completed.accepts_messages());
    }

    #[test]
    fn waiting_can_transition_to_active() {
        assert!(SessionStatus::Waiting.can_transition_to(&SessionStatus::Active));
    }

    #[test]
    fn waiting_cannot_skip_to_completed() {
        assert!(!SessionStatus::Waiting.can_transition_to(&SessionStatus::Completed));
    }

    #[test]
    fn no_reverse_transitions() {
        assert!(!SessionStatus::Active.can_transition_to(&SessionStatus::Waiting));
        assert!(!SessionStatus::Completed.can_transition_to(&SessionStatus::Active));
        assert!(!SessionStatus::Completed.can_transition_to(&SessionStatus::Waiting));
    }

    #[test]
    fn completed_is_terminal() {
        assert!(SessionStatus::Completed.is_terminal());
        assert!(!SessionStatus::Waiting.is_terminal());
        assert!(!SessionStatus::Active.is_terminal());
    }

    #[test]
    fn transition_to_rejects_repeat_activation() {
        assert!(SessionStatus::Active
            .transition_to(SessionStatus::Active)
            .is_err());
    }

    #[test]
    fn display_works_correctly() {
        assert_eq!(format!("{}", SessionStatus::Waiting), "Waiting");
        assert_eq!(format!("{}", SessionStatus::Active), "Active");
        assert_eq!(format!("{}", SessionStatus::Completed), "Completed");
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::Waiting).unwrap(),
            "\"waiting\""
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::Completed).unwrap(),
            "\"completed\""
        );
    }

    #[test]
    fn as_str_matches_serialized_form() {
        for status in [
            SessionStatus::Waiting,
            SessionStatus::Active,
            SessionStatus::Completed,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }
}
