//! Mediation trigger - decides when the mediator takes a turn.
//!
//! The mediator speaks once both participants have shared their view since
//! its last message. Mediator messages bound the window and are never
//! counted as a perspective themselves.

use crate::domain::conversation::{Message, MessageKind};
use crate::domain::session::Session;

/// Outcome of evaluating the trigger after a user message was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediationDecision {
    /// Both participants have spoken since the last mediation.
    Due,
    /// Still waiting on at least one participant.
    NotDue {
        /// User messages seen since the last mediation.
        pending_messages: usize,
    },
}

impl MediationDecision {
    pub fn is_due(&self) -> bool {
        matches!(self, MediationDecision::Due)
    }
}

/// Pure decision logic for mediator turns.
pub struct MediationTrigger;

impl MediationTrigger {
    /// Evaluates the trigger over the session's recent messages, newest first.
    ///
    /// Only user messages newer than the most recent mediator message are
    /// considered. If a previous mediation failed the window simply stays
    /// open, so the next evaluation fires again.
    pub fn evaluate(session: &Session, recent_newest_first: &[Message]) -> MediationDecision {
        let since_last_mediation: Vec<&Message> = recent_newest_first
            .iter()
            .take_while(|m| m.kind() == MessageKind::User)
            .collect();

        let creator_spoke = since_last_mediation
            .iter()
            .any(|m| session.creator_name().matches(m.sender_name()));
        let partner_spoke = since_last_mediation
            .iter()
            .any(|m| session.partner_name().matches(m.sender_name()));

        if creator_spoke && partner_spoke {
            MediationDecision::Due
        } else {
            MediationDecision::NotDue {
                pending_messages: since_last_mediation.len(),
            }
        }
    }
}
