//! Handlers for the `/users` resource (read-only).

use axum::extract::State;
use axum::Json;
use bloglist_db::models::user::UserResponse;
use bloglist_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/users
///
/// Public listing of user summaries. Registration is not exposed here;
/// accounts are provisioned out of band.
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}
