//! Repository for the `sessions` table.
//!
//! Sessions bind an opaque token to a user id. The interesting operation
//! is [`SessionRepo::destroy_all_for_user`]: a best-effort batch that
//! revokes every session a user holds, tolerating partial failure.

use bloglist_core::types::DbId;
use futures::future::join_all;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::session::Session;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "token, user_id, created_at";

/// Outcome of a best-effort bulk revocation.
///
/// Each record's deletion is attempted independently; `failed` counts
/// the deletions that errored and were skipped.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RevocationSummary {
    pub destroyed: u64,
    pub failed: u64,
}

/// Provides CRUD operations for sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session bound to `user_id`, returning the created row.
    ///
    /// The token is a freshly generated v4 UUID; the primary-key
    /// constraint rejects a colliding token instead of silently
    /// rebinding it.
    pub async fn create(pool: &PgPool, user_id: DbId) -> Result<Session, sqlx::Error> {
        let query =
            format!("INSERT INTO sessions (token, user_id) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Session>(&query)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Resolve a presented token to its session row.
    pub async fn find_by_token(
        pool: &PgPool,
        token: Uuid,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE token = $1");
        sqlx::query_as::<_, Session>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Delete one session. Idempotent: returns `false` when no row
    /// matched, which is not an error.
    pub async fn destroy(pool: &PgPool, token: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the tokens of every session bound to `user_id`.
    pub async fn find_tokens_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let rows: Vec<(Uuid,)> = sqlx::query_as("SELECT token FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(token,)| token).collect())
    }

    /// Destroy every session bound to `user_id`, one record at a time.
    ///
    /// Deletions run concurrently and independently: a failed deletion
    /// is logged and counted without aborting the rest of the batch, so
    /// a user with N sessions loses as many of them as the store will
    /// allow. Only a failure of the enumeration itself fails the call
    /// as a whole -- callers can tell that apart from "zero matched"
    /// (an `Ok` summary with `destroyed == 0`).
    pub async fn destroy_all_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<RevocationSummary, sqlx::Error> {
        let tokens = Self::find_tokens_for_user(pool, user_id).await?;

        let results = join_all(tokens.iter().map(|token| Self::destroy(pool, *token))).await;

        let mut summary = RevocationSummary::default();
        for (token, result) in tokens.iter().zip(results) {
            match result {
                // A vanished row (raced by another logout) still counts
                // as destroyed: the token no longer resolves.
                Ok(_) => summary.destroyed += 1,
                Err(error) => {
                    summary.failed += 1;
                    tracing::error!(%token, user_id, %error, "Failed to destroy session");
                }
            }
        }

        Ok(summary)
    }
}
