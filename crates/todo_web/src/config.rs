//! Configuration management for the todo web service
//!
//! Supports loading configuration from environment variables with fallback to defaults.

use chrono::Duration;
use session_manager::DEFAULT_SESSION_TIMEOUT_SECS;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_PATH: &str = "todos.db";
pub const DEFAULT_SESSION_DIR: &str = "sessions";
pub const DEFAULT_SESSION_COOKIE: &str = "todo_session";
pub const DEFAULT_WORKER_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub session_dir: PathBuf,
    pub session_cookie: String,
    /// Sessions idle for longer than this are logged out and removed
    pub session_timeout: Duration,
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            session_timeout: Duration::seconds(DEFAULT_SESSION_TIMEOUT_SECS),
            workers: DEFAULT_WORKER_COUNT,
        }
    }
}

impl ServerConfig {
    /// Load ServerConfig from environment variables
    ///
    /// Environment variables:
    /// - `APP_HOST`: Address to bind (default: 127.0.0.1)
    /// - `APP_PORT`: Port to bind (default: 8080)
    /// - `APP_WORKERS`: HTTP worker count (default: 4)
    /// - `TODO_DB_PATH`: SQLite database file (default: todos.db)
    /// - `TODO_SESSION_DIR`: Directory for session files (default: sessions)
    /// - `TODO_SESSION_COOKIE`: Name of the session cookie (default: todo_session)
    /// - `TODO_SESSION_TIMEOUT`: Session idle timeout in seconds (default: 86400)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("APP_HOST")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.host),
            port: lookup("APP_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            database_path: lookup("TODO_DB_PATH")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            session_dir: lookup("TODO_SESSION_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.session_dir),
            session_cookie: lookup("TODO_SESSION_COOKIE")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.session_cookie),
            session_timeout: lookup("TODO_SESSION_TIMEOUT")
                .and_then(|v| parse_timeout_secs(&v))
                .unwrap_or(defaults.session_timeout),
            workers: lookup("APP_WORKERS")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.workers),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// A positive whole number of seconds.
pub fn parse_timeout_secs(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|secs| *secs > 0)
        .and_then(Duration::try_seconds)
}
