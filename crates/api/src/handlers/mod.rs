//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `bloglist_db` and map errors
//! via [`crate::error::AppError`].

pub mod auth;
pub mod blogs;
pub mod users;
