//! Session domain module.
//!
//! Handles the mediation session lifecycle: creation with an invite code,
//! the partner joining, and the alternating turn order between the two
//! participants.

mod aggregate;
mod errors;
mod invite_code;

pub use aggregate::Session;
pub use errors::SessionError;
pub use invite_code::{InviteCode, MAX_INVITE_CODE_LENGTH, MIN_INVITE_CODE_LENGTH};
