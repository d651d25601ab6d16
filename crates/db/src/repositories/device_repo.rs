//! Repository for the `devices` table.

use cravex_core::types::{DbId, DeviceId};
use sqlx::PgPool;

use crate::models::device::Device;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, label, last_seen_at, created_at";

/// Provides device binding and lookup.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Bind `device_id` to `user_id` in a single statement.
    ///
    /// - Unseen id: the row is created with `label` (or `default_label`).
    /// - Already owned by `user_id`: the label is replaced when one is given
    ///   and `last_seen_at` is refreshed.
    /// - Owned by anyone else: nothing is written and `None` is returned.
    ///
    /// The primary key decides races between concurrent first binds.
    pub async fn bind(
        pool: &PgPool,
        device_id: DeviceId,
        user_id: DbId,
        label: Option<&str>,
        default_label: &str,
    ) -> Result<Option<Device>, sqlx::Error> {
        let query = format!(
            "INSERT INTO devices AS d (id, user_id, label, last_seen_at)
             VALUES ($1, $2, COALESCE($3, $4), NOW())
             ON CONFLICT (id) DO UPDATE SET
                label = COALESCE($3, d.label),
                last_seen_at = NOW()
             WHERE d.user_id = EXCLUDED.user_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(device_id)
            .bind(user_id)
            .bind(label)
            .bind(default_label)
            .fetch_optional(pool)
            .await
    }

    /// Find a device only if it belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        device_id: DeviceId,
        user_id: DbId,
    ) -> Result<Option<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Device>(&query)
            .bind(device_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's devices, most recently bound first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Device>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM devices WHERE user_id = $1 ORDER BY created_at DESC, id"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
