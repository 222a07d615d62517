//! # Session Manager
//!
//! Server-side session state for the todo web app. Each browser holds an
//! opaque [`SessionId`] in a cookie; the only thing stored against it is
//! whether the visitor has logged in. Sessions not written for longer
//! than the manager's timeout are logged out and deleted.

pub mod error;
pub mod manager;
pub mod storage;
pub mod structs;

// Re-exports
pub use error::SessionError;
pub use manager::{SessionManager, DEFAULT_SESSION_TIMEOUT_SECS};
pub use storage::{FileSessionStorage, InMemorySessionStorage, SessionStorage};
pub use structs::{LoginSession, SessionId};
