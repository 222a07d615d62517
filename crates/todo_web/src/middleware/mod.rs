pub mod session_middleware;
pub mod tracing_middleware;

pub use session_middleware::{CurrentSession, SessionMiddleware};
pub use tracing_middleware::{TracingMiddleware, REQUEST_ID_HEADER};
