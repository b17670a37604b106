//! Session cookie middleware
//!
//! Resolves the visitor's session from the `bookings_session` cookie and
//! makes its `SessionId` available to handlers as a request extension.
//! Visitors without a live session get a fresh one and a `Set-Cookie` header.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

use crate::adapters::InMemorySessionStore;
use crate::domain::ports::SessionStore;
use crate::error::AppError;

pub const SESSION_COOKIE_NAME: &str = "bookings_session";

/// Attributes of the session cookie
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub max_age: chrono::Duration,
    /// Only send over HTTPS
    pub secure: bool,
}

impl SessionCookie {
    fn header_value(&self, token: &str) -> String {
        let mut value = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE_NAME,
            token,
            self.max_age.num_seconds()
        );
        if self.secure {
            value.push_str("; Secure");
        }
        value
    }
}

#[derive(Clone)]
pub struct SessionState {
    pub store: Arc<InMemorySessionStore>,
    pub cookie: SessionCookie,
}

/// Extract the session token from the Cookie header(s)
fn extract_session_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, value)| value)
}

pub async fn session_middleware(
    State(state): State<SessionState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_session_token(&request).map(str::to_owned);
    let session = state.store.load(token.as_deref()).await?;

    request.extensions_mut().insert(session.id);
    let mut response = next.run(request).await;

    if session.is_new {
        let cookie = state.cookie.header_value(&session.id.to_string());
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!(error = %e, "Cannot encode session cookie"),
        }
    }

    Ok(response)
}
