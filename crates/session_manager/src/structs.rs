//! Session data structures

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::{Uuid, Version};

/// Opaque session token handed to the browser.
///
/// Only random (v4) UUIDs in the hyphenated form are accepted, so a token is
/// always safe to use as a file name and always displays as it was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() != uuid::fmt::Hyphenated::LENGTH {
            return None;
        }
        Uuid::parse_str(raw)
            .ok()
            .filter(|uuid| uuid.get_version() == Some(Version::Random))
            .map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

/// Per-visitor state kept on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSession {
    /// Set by a successful login, cleared by logout
    #[serde(default)]
    pub login: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Default for LoginSession {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            login: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl LoginSession {
    pub fn set_login(&mut self, login: bool) {
        self.login = login;
        self.updated_at = Utc::now();
    }

    /// Whether the session has gone `timeout` without being written.
    pub fn is_expired(&self, timeout: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.updated_at) > timeout
    }
}
