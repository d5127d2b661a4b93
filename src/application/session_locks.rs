//! Per-session serialization.
//!
//! Turn enforcement is a read-modify-write on the session document, and the
//! mediation trigger reads what the post just wrote. Both run while holding
//! the session's lock so concurrent posts to one session cannot interleave.
//! Different sessions never contend.
//!
//! The locks live in process memory. Several processes sharing one
//! database are not serialized against each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::SessionId;

/// Idle entries are pruned once the table grows past this size.
const PRUNE_THRESHOLD: usize = 1024;

/// Guard held for the duration of one session operation.
pub type SessionGuard = OwnedMutexGuard<()>;

/// Registry of per-session async mutexes.
#[derive(Debug, Clone, Default)]
pub struct SessionLocks {
    locks: Arc<Mutex<HashMap<SessionId, Arc<AsyncMutex<()>>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other task holds `session_id`'s lock, then takes it.
    pub async fn lock(&self, session_id: SessionId) -> SessionGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|p| p.into_inner());
            if locks.len() > PRUNE_THRESHOLD {
                locks.retain(|_, l| Arc::strong_count(l) > 1);
            }
            Arc::clone(locks.entry(session_id).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of sessions with a registered lock.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
