//! Session storage trait and implementations

use crate::error::{Result, SessionError};
use crate::structs::{LoginSession, SessionId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session storage trait
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Load a session
    async fn load_session(&self, session_id: &SessionId) -> Result<LoginSession>;

    /// Save a session
    async fn save_session(&self, session_id: &SessionId, session: &LoginSession) -> Result<()>;

    /// Check if a session exists
    async fn session_exists(&self, session_id: &SessionId) -> bool;

    /// Delete a session
    async fn delete_session(&self, session_id: &SessionId) -> Result<()>;

    /// Ids of every stored session
    async fn list_sessions(&self) -> Result<Vec<SessionId>>;
}

/// File-based session storage, one JSON document per session
#[derive(Clone)]
pub struct FileSessionStorage {
    base_path: PathBuf,
}

impl FileSessionStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn session_path(&self, session_id: &SessionId) -> PathBuf {
        self.base_path.join(format!("{}.json", session_id))
    }

    /// Unique per write, so concurrent saves of one session never share a
    /// scratch file.
    fn temp_path(&self, session_id: &SessionId) -> PathBuf {
        self.base_path
            .join(format!("{}.{}.tmp", session_id, Uuid::new_v4().simple()))
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load_session(&self, session_id: &SessionId) -> Result<LoginSession> {
        let path = self.session_path(session_id);

        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(SessionError::NotFound)
            }
            Err(err) => return Err(err.into()),
        };
        let session: LoginSession = serde_json::from_str(&contents)?;

        Ok(session)
    }

    async fn save_session(&self, session_id: &SessionId, session: &LoginSession) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;

        let contents = serde_json::to_string_pretty(session)?;

        // Readers only ever see a complete file
        let temp_path = self.temp_path(session_id);
        fs::write(&temp_path, contents).await?;
        if let Err(err) = fs::rename(&temp_path, self.session_path(session_id)).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(err.into());
        }

        Ok(())
    }

    async fn session_exists(&self, session_id: &SessionId) -> bool {
        fs::try_exists(self.session_path(session_id))
            .await
            .unwrap_or(false)
    }

    async fn delete_session(&self, session_id: &SessionId) -> Result<()> {
        match fs::remove_file(self.session_path(session_id)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn list_sessions(&self) -> Result<Vec<SessionId>> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let Some(id) = file_name
                .to_str()
                .and_then(|name| name.strip_suffix(".json"))
                .and_then(SessionId::parse)
            else {
                continue;
            };
            ids.push(id);
        }

        Ok(ids)
    }
}

/// Process-local session storage. Sessions vanish on restart.
#[derive(Default)]
pub struct InMemorySessionStorage {
    sessions: RwLock<HashMap<SessionId, LoginSession>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn load_session(&self, session_id: &SessionId) -> Result<LoginSession> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or(SessionError::NotFound)
    }

    async fn save_session(&self, session_id: &SessionId, session: &LoginSession) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(*session_id, session.clone());
        Ok(())
    }

    async fn session_exists(&self, session_id: &SessionId) -> bool {
        self.sessions.read().await.contains_key(session_id)
    }

    async fn delete_session(&self, session_id: &SessionId) -> Result<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }

    async fn list_sessions(&self) -> Result<Vec<SessionId>> {
        Ok(self.sessions.read().await.keys().copied().collect())
    }
}
