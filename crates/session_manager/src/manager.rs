//! Session Manager service

use crate::error::{Result, SessionError};
use crate::storage::SessionStorage;
use crate::structs::{LoginSession, SessionId};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Sessions not written for this long are discarded.
pub const DEFAULT_SESSION_TIMEOUT_SECS: i64 = 24 * 60 * 60;

/// Session Manager - reads and writes the login flag for a session token.
///
/// Cloning is cheap; all clones share one storage backend.
#[derive(Clone)]
pub struct SessionManager {
    storage: Arc<dyn SessionStorage>,
    timeout: Duration,
}

impl SessionManager {
    /// Create a new SessionManager with the default timeout
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            timeout: Duration::seconds(DEFAULT_SESSION_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Load a session. Unknown tokens yield a fresh, logged-out session that
    /// is not persisted until something is written to it. An expired session
    /// is deleted and treated the same way.
    pub async fn load(&self, session_id: &SessionId) -> Result<LoginSession> {
        match self.storage.load_session(session_id).await {
            Ok(session) if session.is_expired(self.timeout, Utc::now()) => {
                debug!(session_id = %session_id, "session expired");
                self.destroy(session_id).await?;
                Ok(LoginSession::default())
            }
            Ok(session) => Ok(session),
            Err(SessionError::NotFound) => Ok(LoginSession::default()),
            Err(e) => Err(e),
        }
    }

    pub async fn is_logged_in(&self, session_id: &SessionId) -> Result<bool> {
        Ok(self.load(session_id).await?.login)
    }

    /// Set the login flag, creating the session if needed
    pub async fn set_login(&self, session_id: &SessionId, login: bool) -> Result<()> {
        let mut session = self.load(session_id).await?;
        session.set_login(login);
        self.storage.save_session(session_id, &session).await?;
        debug!(session_id = %session_id, login, "session login flag updated");
        Ok(())
    }

    /// Drop all state for a session
    pub async fn destroy(&self, session_id: &SessionId) -> Result<()> {
        self.storage.delete_session(session_id).await
    }

    /// Delete every expired session from storage. Unreadable sessions are
    /// deleted too. Returns how many were removed.
    pub async fn cleanup(&self) -> Result<usize> {
        let now = Utc::now();
        let mut removed = 0;

        for session_id in self.storage.list_sessions().await? {
            let expired = match self.storage.load_session(&session_id).await {
                Ok(session) => session.is_expired(self.timeout, now),
                Err(SessionError::NotFound) => continue,
                Err(SessionError::SerializationError(e)) => {
                    warn!(session_id = %session_id, "discarding unreadable session: {}", e);
                    true
                }
                Err(e) => return Err(e),
            };
            if expired {
                self.destroy(&session_id).await?;
                removed += 1;
            }
        }

        if removed > 0 {
            info!("Removed {} expired sessions", removed);
        }
        Ok(removed)
    }
}
