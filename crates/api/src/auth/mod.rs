//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`credentials`] -- username/password verification against stored users.
//! - [`cookies`] -- session-token cookie construction and extraction.

pub mod cookies;
pub mod credentials;
pub mod password;
