//! Session-cookie authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use bloglist_core::error::CoreError;
use bloglist_core::types::DbId;
use bloglist_db::repositories::SessionRepo;
use uuid::Uuid;

use crate::auth::cookies::extract_session_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the session-token cookie.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(session: SessionUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = session.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Exactly one session-store lookup is performed per request; nothing is
/// cached across requests. A missing, malformed, or unknown token
/// rejects the request with 401 before it reaches the handler.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The owning user's database id, recovered from the session record.
    pub user_id: DbId,
    /// The presented session token.
    pub token: Uuid,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = extract_session_token(&parts.headers)
            .ok_or_else(|| invalid_session("Missing session cookie"))?;

        let token =
            Uuid::parse_str(&raw).map_err(|_| invalid_session("Malformed session token"))?;

        let session = SessionRepo::find_by_token(&state.pool, token)
            .await?
            .ok_or_else(|| invalid_session("Invalid session"))?;

        Ok(SessionUser {
            user_id: session.user_id,
            token,
        })
    }
}

fn invalid_session(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}
