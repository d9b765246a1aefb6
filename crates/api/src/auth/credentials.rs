//! Username/password verification against stored identities.

use bloglist_core::error::CoreError;
use bloglist_db::models::user::User;
use bloglist_db::repositories::UserRepo;
use sqlx::PgPool;

use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};

/// Look up `username` and check `password` against its stored hash.
///
/// An unknown username and a wrong password fail identically, so the
/// response never reveals which usernames exist. No side effects.
pub async fn verify_credentials(
    pool: &PgPool,
    username: &str,
    password: &str,
) -> AppResult<User> {
    let user = UserRepo::find_by_username(pool, username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(invalid_credentials());
    }

    Ok(user)
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}
