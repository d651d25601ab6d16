//! Repository for the `users` table.

use cravex_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, otp_code_hash, otp_expires_at, otp_failed_attempts, \
                        created_at, updated_at";

/// Provides the user operations needed by the login flow.
pub struct UserRepo;

impl UserRepo {
    /// Store a new pending code for `email`, creating the user if unseen.
    ///
    /// Any previous code is overwritten and the failed-attempt counter reset.
    pub async fn upsert_otp(
        pool: &PgPool,
        email: &str,
        otp_code_hash: &str,
        otp_expires_at: Timestamp,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, otp_code_hash, otp_expires_at)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_users_email DO UPDATE SET
                otp_code_hash = EXCLUDED.otp_code_hash,
                otp_expires_at = EXCLUDED.otp_expires_at,
                otp_failed_attempts = 0
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(otp_code_hash)
            .bind(otp_expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Spend one verification attempt on the user's pending code.
    ///
    /// The counter is bumped only while the code is unexpired and fewer than
    /// `max_attempts` attempts have been spent, in the same statement that
    /// checks those conditions. Returns the stored hash to verify against, or
    /// `None` when there is no code left to try. A successful
    /// [`UserRepo::consume_otp`] clears the counter again.
    pub async fn reserve_otp_attempt(
        pool: &PgPool,
        id: DbId,
        max_attempts: i32,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE users SET otp_failed_attempts = otp_failed_attempts + 1
             WHERE id = $1
               AND otp_code_hash IS NOT NULL
               AND otp_expires_at > NOW()
               AND otp_failed_attempts < $2
             RETURNING otp_code_hash",
        )
        .bind(id)
        .bind(max_attempts)
        .fetch_optional(pool)
        .await
    }

    /// Clear the pending code if it is still the one identified by `otp_code_hash`
    /// and has not expired.
    ///
    /// Returns `true` only for the caller that actually cleared it, so two
    /// concurrent verifications of one code cannot both succeed.
    pub async fn consume_otp(
        pool: &PgPool,
        id: DbId,
        otp_code_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET
                otp_code_hash = NULL,
                otp_expires_at = NULL,
                otp_failed_attempts = 0
             WHERE id = $1 AND otp_code_hash = $2 AND otp_expires_at > NOW()",
        )
        .bind(id)
        .bind(otp_code_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
