//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `session` - Session lifecycle and the turn state machine
//! - `conversation` - Messages and conversation windows
//! - `mediation` - Mediation trigger, context building and prompt templates

pub mod conversation;
pub mod foundation;
pub mod mediation;
pub mod session;
