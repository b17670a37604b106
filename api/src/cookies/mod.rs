//! Cookie-based visitor sessions

pub mod session;

pub use session::{session_middleware, SessionCookie, SessionState};
