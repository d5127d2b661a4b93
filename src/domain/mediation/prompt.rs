//! Prompt templates turn a [`MediationContext`] into backend-specific text.

use super::MediationContext;

/// Renders mediator prompts.
///
/// Templates may differ per generation backend; the context they receive
/// does not.
pub trait PromptTemplate: Send + Sync {
    fn render(&self, context: &MediationContext) -> String;
}

/// Relationship-mediator prompt used with the `duke` model.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipMediatorTemplate;

impl PromptTemplate for RelationshipMediatorTemplate {
    fn render(&self, context: &MediationContext) -> String {
        format!(
            "Previous messages:\n{}\n\nCurrent message from {}: {}\n\n\
             As a relationship mediator, provide a response that acknowledges their \
             perspective and guides the conversation constructively.",
            context.transcript(),
            context.current_speaker,
            context.current_message,
        )
    }
}
