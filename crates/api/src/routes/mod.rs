pub mod auth;
pub mod blogs;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// POST   /login        login (public)
/// DELETE /logout       logout (requires session)
///
/// GET    /blogs        list (public)
/// POST   /blogs        create (requires session)
/// PUT    /blogs/{id}   update likes (requires session)
/// DELETE /blogs/{id}   delete (owner only)
///
/// GET    /users        list user summaries (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/blogs", blogs::router())
        .nest("/users", users::router())
}
