//! Repository for the `blogs` table.

use bloglist_core::types::DbId;
use sqlx::PgPool;

use crate::models::blog::{Blog, BlogWithOwnerRow, CreateBlog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, author, url, likes, year, user_id, created_at, updated_at";

/// Provides CRUD operations for blogs.
pub struct BlogRepo;

impl BlogRepo {
    /// Insert a new blog, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBlog) -> Result<Blog, sqlx::Error> {
        let query = format!(
            "INSERT INTO blogs (title, author, url, likes, year, user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.url)
            .bind(input.likes)
            .bind(input.year)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a blog by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE id = $1");
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all blogs joined with their owners' public columns, oldest
    /// first.
    pub async fn list_with_owners(pool: &PgPool) -> Result<Vec<BlogWithOwnerRow>, sqlx::Error> {
        sqlx::query_as::<_, BlogWithOwnerRow>(
            "SELECT b.id, b.title, b.author, b.url, b.likes, b.year,
                    u.id AS owner_id, u.username AS owner_username, u.name AS owner_name
             FROM blogs b
             JOIN users u ON u.id = b.user_id
             ORDER BY b.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Set a blog's like counter, returning the updated row.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_likes(
        pool: &PgPool,
        id: DbId,
        likes: i32,
    ) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!(
            "UPDATE blogs SET likes = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .bind(likes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a blog. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
