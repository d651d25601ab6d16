//! User model.

use cravex_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `users` table.
///
/// Never serialized to clients: it carries the pending code hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub otp_code_hash: Option<String>,
    pub otp_expires_at: Option<Timestamp>,
    pub otp_failed_attempts: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
