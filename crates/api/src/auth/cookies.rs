//! Session-token cookie construction and extraction.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use uuid::Uuid;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Build the `Set-Cookie` value handed out on login.
pub fn build_session_cookie(token: Uuid) -> String {
    format!("{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/")
}

/// Build the expired `Set-Cookie` value that clears the session cookie
/// on logout.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

/// Extract the raw session token from a request's `Cookie` headers.
///
/// Returns `None` when no cookie of the right name is present. The value
/// is not parsed here; the session extractor decides whether it is a
/// well-formed token.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    headers.get_all(COOKIE).iter().find_map(|value| {
        value.to_str().ok()?.split(';').find_map(|pair| {
            let (name, token) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE).then(|| token.to_string())
        })
    })
}
