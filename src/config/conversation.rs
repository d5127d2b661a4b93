//! Conversation tuning: windows, trigger lookback and invite codes

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::session::{MAX_INVITE_CODE_LENGTH, MIN_INVITE_CODE_LENGTH};

/// Conversation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationConfig {
    /// Messages returned with a status query
    #[serde(default = "default_status_window")]
    pub status_window: usize,

    /// Messages shown to the mediator
    #[serde(default = "default_context_window")]
    pub context_window: usize,

    /// Messages scanned when deciding whether the mediator is due
    #[serde(default = "default_trigger_lookback")]
    pub trigger_lookback: usize,

    /// Characters per invite code
    #[serde(default = "default_invite_code_length")]
    pub invite_code_length: usize,

    /// Codes tried before session creation gives up
    #[serde(default = "default_invite_code_attempts")]
    pub invite_code_attempts: usize,
}

impl ConversationConfig {
    /// Validate conversation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("status_window", self.status_window, 1, 100)?;
        check_range("context_window", self.context_window, 1, 50)?;
        check_range("trigger_lookback", self.trigger_lookback, 2, 200)?;
        check_range(
            "invite_code_length",
            self.invite_code_length,
            MIN_INVITE_CODE_LENGTH,
            MAX_INVITE_CODE_LENGTH,
        )?;
        check_range("invite_code_attempts", self.invite_code_attempts, 1, 20)?;
        Ok(())
    }
}

fn check_range(
    field: &'static str,
    value: usize,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange { field, min, max });
    }
    Ok(())
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            status_window: default_status_window(),
            context_window: default_context_window(),
            trigger_lookback: default_trigger_lookback(),
            invite_code_length: default_invite_code_length(),
            invite_code_attempts: default_invite_code_attempts(),
        }
    }
}

fn default_status_window() -> usize {
    10
}

fn default_context_window() -> usize {
    3
}

fn default_trigger_lookback() -> usize {
    20
}

fn default_invite_code_length() -> usize {
    6
}

fn default_invite_code_attempts() -> usize {
    5
}
