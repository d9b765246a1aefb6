//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create DTOs for inserts
//! - `Serialize` response shapes for external-facing output

pub mod blog;
pub mod session;
pub mod user;
