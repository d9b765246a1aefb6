//! Handlers for login and logout.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bloglist_db::models::user::UserResponse;
use bloglist_db::repositories::SessionRepo;
use serde::Deserialize;

use crate::auth::cookies::{build_session_cookie, clear_session_cookie};
use crate::auth::credentials::verify_credentials;
use crate::error::{AppError, AppResult};
use crate::middleware::session::SessionUser;
use crate::state::AppState;

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/login
///
/// Authenticate with username + password. On success a new session is
/// created and its token handed back as an HttpOnly cookie alongside the
/// user's public summary. On failure nothing is created -- no partial
/// state.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    let user = verify_credentials(&state.pool, &input.username, &input.password).await?;

    let session = SessionRepo::create(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "User logged in");

    let cookie = HeaderValue::from_str(&build_session_cookie(session.token))
        .map_err(|e| AppError::InternalError(format!("Session cookie error: {e}")))?;

    let mut response = Json(UserResponse::from(&user)).into_response();
    response.headers_mut().append(SET_COOKIE, cookie);
    Ok(response)
}

/// DELETE /api/logout
///
/// Revoke every session belonging to the authenticated user -- logging
/// out one device logs out all of them -- then clear the caller's own
/// cookie. Per-record revocation failures are logged and skipped; a
/// failure of the revocation batch itself, or of the caller-visible
/// cookie teardown, surfaces as a 500.
pub async fn logout(State(state): State<AppState>, session: SessionUser) -> AppResult<Response> {
    let summary = SessionRepo::destroy_all_for_user(&state.pool, session.user_id)
        .await
        .map_err(|e| {
            tracing::error!(
                user_id = session.user_id,
                error = %e,
                "Session revocation batch failed"
            );
            AppError::LogoutFailure("Failed to destroy sessions".into())
        })?;

    tracing::info!(
        user_id = session.user_id,
        destroyed = summary.destroyed,
        failed = summary.failed,
        "User logged out everywhere"
    );

    let cookie = HeaderValue::from_str(&clear_session_cookie())
        .map_err(|_| AppError::LogoutFailure("Failed to destroy session".into()))?;

    let mut response = StatusCode::OK.into_response();
    response.headers_mut().append(SET_COOKIE, cookie);
    Ok(response)
}
