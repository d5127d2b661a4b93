//! MediationService - runs the mediator's turn after a user message.
//!
//! Evaluates the trigger, builds the context, renders the prompt, calls the
//! generator and stores the reply as a mediator message. Callers hold the
//! session lock while this runs.

use std::sync::Arc;

use crate::domain::conversation::Message;
use crate::domain::mediation::{
    MediationContextBuilder, MediationTrigger, PromptTemplate, RelationshipMediatorTemplate,
};
use crate::domain::session::{Session, SessionError};
use crate::ports::{MessageRepository, TextGenerator};

/// Default number of recent messages scanned by the trigger.
pub const DEFAULT_TRIGGER_LOOKBACK: usize = 20;

/// Orchestrates one mediator turn.
pub struct MediationService {
    messages: Arc<dyn MessageRepository>,
    generator: Arc<dyn TextGenerator>,
    template: Arc<dyn PromptTemplate>,
    context_builder: MediationContextBuilder,
    trigger_lookback: usize,
}

impl MediationService {
    pub fn new(messages: Arc<dyn MessageRepository>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            messages,
            generator,
            template: Arc::new(RelationshipMediatorTemplate),
            context_builder: MediationContextBuilder::default(),
            trigger_lookback: DEFAULT_TRIGGER_LOOKBACK,
        }
    }

    pub fn with_template(mut self, template: Arc<dyn PromptTemplate>) -> Self {
        self.template = template;
        self
    }

    pub fn with_context_window(mut self, window_size: usize) -> Self {
        self.context_builder = MediationContextBuilder::new(window_size);
        self
    }

    pub fn with_trigger_lookback(mut self, lookback: usize) -> Self {
        self.trigger_lookback = lookback;
        self
    }

    /// Mediates if both participants have spoken since the last mediator
    /// message. `trigger` is the user message that was just stored.
    ///
    /// Returns the stored mediator message, or `None` when mediation is not
    /// due yet.
    ///
    /// # Errors
    ///
    /// - `MediationFailed` if generation fails or yields blank text
    /// - `Infrastructure` if messages cannot be read or stored
    pub async fn mediate_if_due(
        &self,
        session: &Session,
        trigger: &Message,
    ) -> Result<Option<Message>, SessionError> {
        let fetch = self
            .trigger_lookback
            .max(self.context_builder.window_size());
        let recent = self.messages.recent(session.id(), fetch).await?;

        let scanned = recent.len().min(self.trigger_lookback);
        let decision = MediationTrigger::evaluate(session, &recent[..scanned]);
        if !decision.is_due() {
            tracing::debug!(session_id = %session.id(), ?decision, "Mediation not due");
            return Ok(None);
        }

        let context = self.context_builder.build(trigger, recent);
        let prompt = self.template.render(&context);
        let info = self.generator.info();

        let reply = match self.generator.generate(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(
                    session_id = %session.id(),
                    backend = %info.name,
                    model = %info.model,
                    error = %e,
                    "Mediation failed"
                );
                return Err(SessionError::mediation_failed(e.to_string()));
            }
        };

        let mediator_message = Message::mediator(*session.id(), reply.trim()).map_err(|_| {
            tracing::warn!(
                session_id = %session.id(),
                backend = %info.name,
                "Mediator returned blank text"
            );
            SessionError::mediation_failed("Mediator returned an empty response")
        })?;

        self.messages.append(&mediator_message).await?;

        tracing::info!(
            session_id = %session.id(),
            message_id = %mediator_message.id(),
            backend = %info.name,
            "Mediator responded"
        );

        Ok(Some(mediator_message))
    }
}
