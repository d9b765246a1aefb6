//! Handlers for the `/blogs` resource.
//!
//! The list endpoint is public; every mutation requires a resolved
//! session. Deleting is owner-gated; updating likes deliberately is not
//! -- any logged-in user may adjust the counter.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bloglist_core::blog::{self, NewBlog};
use bloglist_core::error::CoreError;
use bloglist_core::types::DbId;
use bloglist_db::models::blog::{BlogWithOwner, CreateBlog};
use bloglist_db::repositories::BlogRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::session::SessionUser;
use crate::state::AppState;

/// GET /api/blogs
///
/// Public listing of every post with its owner's public summary. No
/// session required.
pub async fn list_blogs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = BlogRepo::list_with_owners(&state.pool).await?;
    let blogs: Vec<BlogWithOwner> = rows.into_iter().map(BlogWithOwner::from).collect();

    Ok(Json(blogs))
}

/// POST /api/blogs
///
/// Create a post owned by the authenticated caller. Title, author, and
/// url are required non-empty strings; likes defaults to 0 and year to
/// the current calendar year.
pub async fn create_blog(
    session: SessionUser,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input = NewBlog::parse(&body)?;

    let blog = BlogRepo::create(
        &state.pool,
        &CreateBlog {
            title: input.title,
            author: input.author,
            url: input.url,
            likes: input.likes,
            year: input.year,
            user_id: session.user_id,
        },
    )
    .await?;

    tracing::info!(blog_id = blog.id, user_id = session.user_id, "Blog created");

    Ok((StatusCode::CREATED, Json(blog)))
}

/// PUT /api/blogs/{id}
///
/// Set a post's like counter. Requires a session but not ownership.
pub async fn update_likes(
    session: SessionUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let id = parse_blog_id(&id)?;
    let likes = blog::parse_likes_update(&body)?;

    let blog = BlogRepo::update_likes(&state.pool, id, likes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Blog", id }))?;

    tracing::info!(
        blog_id = id,
        likes,
        user_id = session.user_id,
        "Blog likes updated"
    );

    Ok(Json(blog))
}

/// DELETE /api/blogs/{id}
///
/// Delete a post. Only the owner may do this; a valid session for the
/// wrong user is rejected with 401 and the post is left untouched.
pub async fn delete_blog(
    session: SessionUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_blog_id(&id)?;

    let blog = BlogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Blog", id }))?;

    if blog.user_id != session.user_id {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Only the owner may delete a blog".into(),
        )));
    }

    BlogRepo::delete(&state.pool, id).await?;

    tracing::info!(blog_id = id, user_id = session.user_id, "Blog deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Parse a path id, rejecting anything that is not a well-formed row id.
fn parse_blog_id(raw: &str) -> AppResult<DbId> {
    raw.parse::<DbId>()
        .map_err(|_| AppError::BadRequest(format!("Invalid blog id '{raw}'")))
}
