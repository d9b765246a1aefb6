//! Validation of incoming blog input.
//!
//! Request bodies arrive as loose JSON so that malformed field types
//! (`likes: "abc"`) can be rejected with a 400 validation error rather
//! than a deserialization rejection. The functions here turn a
//! `serde_json::Value` into validated domain input.

use chrono::{Datelike, Utc};
use serde_json::Value;

use crate::error::CoreError;

/// Validated input for creating a blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlog {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i32,
    pub year: i32,
}

impl NewBlog {
    /// Parse and validate a create-blog request body.
    ///
    /// `title`, `author`, and `url` must be present, non-empty strings.
    /// `likes` defaults to 0 when absent; a present value must be a
    /// non-negative integer. `year` defaults to the current calendar
    /// year when absent; a present value must be an integer.
    pub fn parse(body: &Value) -> Result<Self, CoreError> {
        let title = required_text(body, "title")?;
        let author = required_text(body, "author")?;
        let url = required_text(body, "url")?;

        let likes = match body.get("likes") {
            None | Some(Value::Null) => 0,
            Some(value) => parse_likes(value)?,
        };

        let year = match body.get("year") {
            None | Some(Value::Null) => current_year(),
            Some(value) => parse_year(value)?,
        };

        Ok(NewBlog {
            title,
            author,
            url,
            likes,
            year,
        })
    }
}

/// The current calendar year (UTC), used as the `year` default.
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Parse a likes value: must be a non-negative integer.
pub fn parse_likes(value: &Value) -> Result<i32, CoreError> {
    value
        .as_i64()
        .filter(|likes| *likes >= 0)
        .and_then(|likes| i32::try_from(likes).ok())
        .ok_or_else(|| CoreError::Validation("likes must be a non-negative integer".into()))
}

/// Parse the `likes` field of an update-likes request body.
///
/// Unlike creation, the field is required here.
pub fn parse_likes_update(body: &Value) -> Result<i32, CoreError> {
    let value = body
        .get("likes")
        .ok_or_else(|| CoreError::Validation("likes is required".into()))?;
    parse_likes(value)
}

fn parse_year(value: &Value) -> Result<i32, CoreError> {
    value
        .as_i64()
        .and_then(|year| i32::try_from(year).ok())
        .ok_or_else(|| CoreError::Validation("year must be an integer".into()))
}

fn required_text(body: &Value, field: &str) -> Result<String, CoreError> {
    let text = body
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();

    if text.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }

    Ok(text.to_string())
}
