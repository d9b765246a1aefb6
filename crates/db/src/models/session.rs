//! Session model.

use bloglist_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use uuid::Uuid;

/// A session row from the `sessions` table.
///
/// The token is the opaque credential handed to the client as a cookie;
/// the row binds it to the owning user. Multiple concurrent sessions per
/// user are expected -- one per logged-in device or browser.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub token: Uuid,
    pub user_id: DbId,
    pub created_at: Timestamp,
}
