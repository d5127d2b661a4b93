//! Invite codes - short public tokens a partner uses to join a session.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Characters used in generated codes.
///
/// Omits 0/O, 1/I/L so codes survive being read aloud or retyped.
const ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Smallest code length accepted for generation.
pub const MIN_INVITE_CODE_LENGTH: usize = 4;

/// Largest code length accepted for generation or parsing.
pub const MAX_INVITE_CODE_LENGTH: usize = 16;

/// Short unique token identifying a joinable session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteCode(String);

impl InviteCode {
    /// Generates a random code of `length` characters.
    ///
    /// Uniqueness is not guaranteed here; callers check the store and
    /// regenerate on collision.
    pub fn generate(length: usize) -> Self {
        let length = length.clamp(MIN_INVITE_CODE_LENGTH, MAX_INVITE_CODE_LENGTH);
        let mut rng = rand::thread_rng();
        let code = (0..length)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Parses user input into a code.
    ///
    /// Surrounding whitespace is ignored and letters are upper-cased, so
    /// `" ab3k9z "` and `"AB3K9Z"` refer to the same session.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(ValidationError::empty_field("invite_code"));
        }
        if normalized.len() > MAX_INVITE_CODE_LENGTH {
            return Err(ValidationError::too_long(
                "invite_code",
                MAX_INVITE_CODE_LENGTH,
                normalized.len(),
            ));
        }
        if !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::invalid_format(
                "invite_code",
                "only letters and digits are allowed",
            ));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
