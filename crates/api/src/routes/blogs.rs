//! Route definitions for the `/blogs` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::blogs;
use crate::state::AppState;

/// Routes mounted at `/blogs`.
///
/// ```text
/// GET    /       -> list_blogs (public)
/// POST   /       -> create_blog
/// PUT    /{id}   -> update_likes
/// DELETE /{id}   -> delete_blog (owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blogs::list_blogs).post(blogs::create_blog))
        .route(
            "/{id}",
            delete(blogs::delete_blog).put(blogs::update_likes),
        )
}
