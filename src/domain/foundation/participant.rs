//! Participant name value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Maximum length for a participant name.
pub const MAX_PARTICIPANT_NAME_LENGTH: usize = 100;

/// Sender identity used for mediator-authored messages.
///
/// Reserved: no participant may use it.
pub const MEDIATOR_NAME: &str = "mediator";

/// Name of one of the two people in a session.
///
/// Names are kept verbatim. Comparisons against them are exact and
/// case-sensitive, so `"Bob"` and `"bob"` are different participants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantName(String);

impl ParticipantName {
    /// Validates and wraps a participant name.
    ///
    /// `field` names the input in the error, e.g. `"creator_name"`.
    pub fn new(field: &str, name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        let length = name.chars().count();
        if length > MAX_PARTICIPANT_NAME_LENGTH {
            return Err(ValidationError::too_long(
                field,
                MAX_PARTICIPANT_NAME_LENGTH,
                length,
            ));
        }
        if name == MEDIATOR_NAME {
            return Err(ValidationError::invalid_format(
                field,
                format!("'{}' is reserved", MEDIATOR_NAME),
            ));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact match against a raw name.
    pub fn matches(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ParticipantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_name() {
        let name = ParticipantName::new("creator_name", "Alice").unwrap();
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn keeps_name_verbatim() {
        let name = ParticipantName::new("creator_name", " Alice ").unwrap();
        assert_eq!(name.as_str(), " Alice ");
    }

    #[test]
    fn rejects_blank_name() {
        let err = ParticipantName::new("partner_name", "   ").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("partner_name"));
    }

    #[test]
    fn rejects_overlong_name() {
        let long = "x".repeat(MAX_PARTICIPANT_NAME_LENGTH + 1);
        let err = ParticipantName::new("partner_name", long).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { .. }));
    }

    #[test]
    fn rejects_mediator_identity() {
        let err = ParticipantName::new("partner_name", MEDIATOR_NAME).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let name = ParticipantName::new("creator_name", "Bob").unwrap();
        assert!(name.matches("Bob"));
        assert!(!name.matches("bob"));
        assert!(!name.matches("Bob "));
    }
}
