//! Repository for the `configs` table.

use cravex_core::device_config::{ConfigBundle, ConfigPatch};
use cravex_core::types::DbId;
use sqlx::PgPool;

use crate::models::device_config::DeviceConfig;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, device_id, data, updated_at";

/// Provides read and patch operations for per-user settings.
pub struct ConfigRepo;

impl ConfigRepo {
    /// Find the stored settings row for a user, if one exists.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<DeviceConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM configs WHERE user_id = $1");
        sqlx::query_as::<_, DeviceConfig>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Merge `patch` over the user's stored bundle (or the default) and persist.
    ///
    /// A default row is inserted first when none exists, so the `FOR UPDATE`
    /// read always has a row to lock and concurrent patches to different
    /// fields queue behind each other. Returns the new bundle.
    pub async fn apply_patch(
        pool: &PgPool,
        user_id: DbId,
        patch: &ConfigPatch,
    ) -> Result<ConfigBundle, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO configs (user_id, data)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_configs_user_id DO NOTHING",
        )
        .bind(user_id)
        .bind(ConfigBundle::default().to_stored())
        .execute(&mut *tx)
        .await?;

        let stored: serde_json::Value =
            sqlx::query_scalar("SELECT data FROM configs WHERE user_id = $1 FOR UPDATE")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;

        let merged = ConfigBundle::from_stored(stored)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .merged(patch);

        sqlx::query("UPDATE configs SET data = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(merged.to_stored())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(merged)
    }
}
