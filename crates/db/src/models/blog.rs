//! Blog post entity model and DTOs.

use bloglist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserResponse;

/// Full blog row from the `blogs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Blog {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i32,
    pub year: i32,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a blog: validated input plus the owner.
///
/// The owner is fixed at creation and never updated afterwards.
#[derive(Debug)]
pub struct CreateBlog {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i32,
    pub year: i32,
    pub user_id: DbId,
}

/// A blog row joined with its owner's public columns, as fetched by the
/// list query.
#[derive(Debug, Clone, FromRow)]
pub struct BlogWithOwnerRow {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i32,
    pub year: i32,
    pub owner_id: DbId,
    pub owner_username: String,
    pub owner_name: String,
}

/// Wire shape for the public listing: blog fields plus the embedded
/// `user` summary.
#[derive(Debug, Serialize)]
pub struct BlogWithOwner {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i32,
    pub year: i32,
    pub user: UserResponse,
}

impl From<BlogWithOwnerRow> for BlogWithOwner {
    fn from(row: BlogWithOwnerRow) -> Self {
        BlogWithOwner {
            id: row.id,
            title: row.title,
            author: row.author,
            url: row.url,
            likes: row.likes,
            year: row.year,
            user: UserResponse {
                id: row.owner_id,
                username: row.owner_username,
                name: row.owner_name,
            },
        }
    }
}
