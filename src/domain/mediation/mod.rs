//! Mediation domain module.
//!
//! - `trigger` - When the mediator takes a turn
//! - `context` - What the mediator is shown
//! - `prompt` - How that context becomes prompt text

mod context;
mod prompt;
mod trigger;

pub use context::{MediationContext, MediationContextBuilder, DEFAULT_CONTEXT_WINDOW};
pub use prompt::{PromptTemplate, RelationshipMediatorTemplate};
pub use trigger::{MediationDecision, MediationTrigger};
