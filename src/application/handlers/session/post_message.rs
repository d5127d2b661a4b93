//! PostMessageHandler - Command handler for a participant's turn.
//!
//! Enforces turn order, stores the message, hands the turn over and then
//! lets the mediator speak if both participants have been heard.

use std::sync::Arc;

use crate::application::{MediationService, SessionLocks};
use crate::domain::conversation::Message;
use crate::domain::foundation::{ParticipantName, SessionId};
use crate::domain::session::SessionError;
use crate::ports::SessionRepository;

/// Command to post a message as `sender_name`.
#[derive(Debug, Clone)]
pub struct PostMessageCommand {
    pub session_id: SessionId,
    pub sender_name: String,
    pub content: String,
}

/// Result of an accepted message.
#[derive(Debug, Clone)]
pub struct PostMessageResult {
    /// The stored user message.
    pub message: Message,
    /// Participant who speaks next.
    pub next_turn: ParticipantName,
    /// The mediator's reply, when this message completed a round.
    pub mediator_message: Option<Message>,
}

impl PostMessageResult {
    pub fn mediation_triggered(&self) -> bool {
        self.mediator_message.is_some()
    }
}

/// Handler for posting messages.
pub struct PostMessageHandler {
    sessions: Arc<dyn SessionRepository>,
    mediation: Arc<MediationService>,
    locks: SessionLocks,
}

impl PostMessageHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        mediation: Arc<MediationService>,
        locks: SessionLocks,
    ) -> Self {
        Self {
            sessions,
            mediation,
            locks,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    /// - `InvalidState` unless the session is active
    /// - `TurnViolation` if it is not the sender's turn
    /// - `ValidationFailed` if the content is blank
    /// - `MediationFailed` if the mediator was due but could not answer; the
    ///   message and the turn change are kept
    pub async fn handle(&self, cmd: PostMessageCommand) -> Result<PostMessageResult, SessionError> {
        let _guard = self.locks.lock(cmd.session_id).await;

        // 1. Load and check the turn
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(cmd.session_id))?;

        let sender = session.current_turn().clone();
        let next_turn = session.take_turn(&cmd.sender_name)?;
        let message = Message::user(cmd.session_id, &sender, cmd.content)?;

        // 2. Commit the message and the turn change as one write
        self.sessions.record_turn(&session, &message).await?;

        tracing::info!(
            session_id = %cmd.session_id,
            message_id = %message.id(),
            sender = %sender,
            next_turn = %next_turn,
            "Message accepted"
        );

        // 3. Mediator turn, if due
        let mediator_message = self.mediation.mediate_if_due(&session, &message).await?;

        Ok(PostMessageResult {
            message,
            next_turn,
            mediator_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockError, MockTextGenerator};
    use crate::adapters::repository::{DocumentMessageRepository, DocumentSessionRepository};
    use crate::adapters::storage::InMemoryDocumentStore;
    use crate::domain::conversation::MessageKind;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::session::{InviteCode, Session};
    use crate::ports::{
        Collection, Document, DocumentStore, Filter, FindOptions, MessageRepository, StoreError,
        Write,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Fixture {
        handler: PostMessageHandler,
        sessions: Arc<DocumentSessionRepository>,
        messages: Arc<DocumentMessageRepository>,
        generator: MockTextGenerator,
        session_id: SessionId,
    }

    async fn fixture(generator: MockTextGenerator, join: bool) -> Fixture {
        let store = Arc::new(InMemoryDocumentStore::new());
        let sessions = Arc::new(DocumentSessionRepository::new(store.clone()));
        let messages = Arc::new(DocumentMessageRepository::new(store));

        let mut session = Session::new(
            SessionId::new(),
            InviteCode::generate(6),
            ParticipantName::new("creator_name", "Alice").unwrap(),
            ParticipantName::new("partner_name", "Bob").unwrap(),
        )
        .unwrap();
        if join {
            session.join("Bob").unwrap();
        }
        sessions.save(&session).await.unwrap();

        let mediation = Arc::new(MediationService::new(
            messages.clone(),
            Arc::new(generator.clone()),
        ));
        let handler = PostMessageHandler::new(
            sessions.clone(),
            mediation,
            SessionLocks::new(),
        );

        Fixture {
            handler,
            sessions,
            messages,
            generator,
            session_id: *session.id(),
        }
    }

    fn command(session_id: SessionId, sender: &str, content: &str) -> PostMessageCommand {
        PostMessageCommand {
            session_id,
            sender_name: sender.to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn first_post_hands_turn_over_without_mediation() {
        let f = fixture(MockTextGenerator::new(), true).await;

        let result = f
            .handler
            .handle(command(f.session_id, "Alice", "I feel unheard"))
            .await
            .unwrap();

        assert_eq!(result.next_turn.as_str(), "Bob");
        assert!(!result.mediation_triggered());
        assert_eq!(f.generator.call_count(), 0);

        let stored = f.sessions.find_by_id(&f.session_id).await.unwrap().unwrap();
        assert_eq!(stored.current_turn().as_str(), "Bob");
    }

    #[tokio::test]
    async fn second_post_triggers_mediator() {
        let f = fixture(MockTextGenerator::new().with_response("Thank you both."), true).await;

        f.handler
            .handle(command(f.session_id, "Alice", "I feel unheard"))
            .await
            .unwrap();
        let result = f
            .handler
            .handle(command(f.session_id, "Bob", "I was busy"))
            .await
            .unwrap();

        assert!(result.mediation_triggered());
        assert_eq!(result.next_turn.as_str(), "Alice");

        let stream = f.messages.recent(&f.session_id, 10).await.unwrap();
        let kinds: Vec<_> = stream.iter().rev().map(|m| m.kind()).collect();
        assert_eq!(
            kinds,
            vec![MessageKind::User, MessageKind::User, MessageKind::Mediator]
        );
        assert_eq!(stream[0].content(), "Thank you both.");
    }

    #[tokio::test]
    async fn wrong_sender_is_turn_violation() {
        let f = fixture(MockTextGenerator::new(), true).await;

        let err = f
            .handler
            .handle(command(f.session_id, "Bob", "me first"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::TurnViolation);
        assert!(f.messages.recent(&f.session_id, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn waiting_session_rejects_messages() {
        let f = fixture(MockTextGenerator::new(), false).await;

        let err = f
            .handler
            .handle(command(f.session_id, "Alice", "hello?"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let f = fixture(MockTextGenerator::new(), true).await;

        let err = f
            .handler
            .handle(command(SessionId::new(), "Alice", "hello"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn blank_content_keeps_turn() {
        let f = fixture(MockTextGenerator::new(), true).await;

        let err = f
            .handler
            .handle(command(f.session_id, "Alice", "   "))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);

        let stored = f.sessions.find_by_id(&f.session_id).await.unwrap().unwrap();
        assert_eq!(stored.current_turn().as_str(), "Alice");
    }

    #[tokio::test]
    async fn failed_mediation_keeps_message_and_turn() {
        let generator = MockTextGenerator::new().with_error(MockError::Timeout { timeout_secs: 1 });
        let f = fixture(generator, true).await;

        f.handler
            .handle(command(f.session_id, "Alice", "one"))
            .await
            .unwrap();
        let err = f
            .handler
            .handle(command(f.session_id, "Bob", "two"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::MediationFailed);

        let stored = f.sessions.find_by_id(&f.session_id).await.unwrap().unwrap();
        assert_eq!(stored.current_turn().as_str(), "Alice");
        assert_eq!(f.messages.recent(&f.session_id, 10).await.unwrap().len(), 2);

        let retry = f
            .handler
            .handle(command(f.session_id, "Alice", "three"))
            .await
            .unwrap();
        assert!(retry.mediation_triggered());
    }

    /// In-memory store that refuses session writes while `down` is set.
    struct SessionWriteOutage {
        inner: InMemoryDocumentStore,
        down: AtomicBool,
    }

    impl SessionWriteOutage {
        fn new() -> Self {
            Self {
                inner: InMemoryDocumentStore::new(),
                down: AtomicBool::new(false),
            }
        }

        fn set_down(&self, down: bool) {
            self.down.store(down, Ordering::SeqCst);
        }

        fn refuse(&self, collection: Collection) -> Result<(), StoreError> {
            if collection == Collection::SESSIONS && self.down.load(Ordering::SeqCst) {
                return Err(StoreError::unavailable("sessions table locked"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl DocumentStore for SessionWriteOutage {
        async fn insert(&self, collection: Collection, document: Document) -> Result<(), StoreError> {
            self.refuse(collection)?;
            self.inner.insert(collection, document).await
        }

        async fn find_one(
            &self,
            collection: Collection,
            filter: &Filter,
        ) -> Result<Option<Document>, StoreError> {
            self.inner.find_one(collection, filter).await
        }

        async fn find(
            &self,
            collection: Collection,
            filter: &Filter,
            options: &FindOptions,
        ) -> Result<Vec<Document>, StoreError> {
            self.inner.find(collection, filter, options).await
        }

        async fn update_one(
            &self,
            collection: Collection,
            filter: &Filter,
            document: Document,
        ) -> Result<bool, StoreError> {
            self.refuse(collection)?;
            self.inner.update_one(collection, filter, document).await
        }

        async fn commit(&self, writes: Vec<Write>) -> Result<(), StoreError> {
            for write in &writes {
                match write {
                    Write::Insert { collection, .. } | Write::UpdateOne { collection, .. } => {
                        self.refuse(*collection)?
                    }
                }
            }
            self.inner.commit(writes).await
        }

        async fn ping(&self) -> Result<(), StoreError> {
            self.inner.ping().await
        }
    }

    #[tokio::test]
    async fn failed_session_write_leaves_no_orphan_message() {
        let store = Arc::new(SessionWriteOutage::new());
        let sessions = Arc::new(DocumentSessionRepository::new(store.clone()));
        let messages = Arc::new(DocumentMessageRepository::new(store.clone()));

        let mut session = Session::new(
            SessionId::new(),
            InviteCode::generate(6),
            ParticipantName::new("creator_name", "Alice").unwrap(),
            ParticipantName::new("partner_name", "Bob").unwrap(),
        )
        .unwrap();
        session.join("Bob").unwrap();
        sessions.save(&session).await.unwrap();
        let session_id = *session.id();

        let mediation = Arc::new(MediationService::new(
            messages.clone(),
            Arc::new(MockTextGenerator::new()),
        ));
        let handler = PostMessageHandler::new(sessions.clone(), mediation, SessionLocks::new());

        store.set_down(true);
        let err = handler
            .handle(command(session_id, "Alice", "hi"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
        assert!(messages.recent(&session_id, 10).await.unwrap().is_empty());

        // Once the store recovers Alice still holds the turn, and only once
        store.set_down(false);
        handler
            .handle(command(session_id, "Alice", "hi"))
            .await
            .unwrap();
        let err = handler
            .handle(command(session_id, "Alice", "hi again"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::TurnViolation);

        let senders: Vec<_> = messages
            .recent(&session_id, 10)
            .await
            .unwrap()
            .iter()
            .map(|m| m.sender_name().to_string())
            .collect();
        assert_eq!(senders, vec!["Alice"]);

        let stored = sessions.find_by_id(&session_id).await.unwrap().unwrap();
        assert_eq!(stored.current_turn().as_str(), "Bob");
    }
}
