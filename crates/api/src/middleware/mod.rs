//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the `Authorization: Bearer` session token
//!   to a user. Use `Option<AuthUser>` where a token is optional.

pub mod auth;
