//! Repository for the `events` table.

use cravex_core::telemetry::NewTelemetryEvent;
use cravex_core::types::{DbId, DeviceId, Timestamp};
use sqlx::PgPool;

use crate::models::telemetry::{TelemetryEvent, TypeCount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, device_id, event_type, payload, created_at";

/// Provides append-only writes and read-side aggregation for telemetry.
pub struct TelemetryRepo;

impl TelemetryRepo {
    /// Insert a validated batch for one device in a single transaction and
    /// refresh the device's `last_seen_at`.
    ///
    /// Ownership of `device_id` must be checked by the caller. Returns the
    /// number of rows written.
    pub async fn insert_batch(
        pool: &PgPool,
        user_id: DbId,
        device_id: DeviceId,
        events: &[NewTelemetryEvent],
    ) -> Result<u64, sqlx::Error> {
        if events.is_empty() {
            return Ok(0);
        }

        let mut tx = pool.begin().await?;
        let mut written = 0;

        for event in events {
            let result = sqlx::query(
                "INSERT INTO events (user_id, device_id, event_type, payload, created_at)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(user_id)
            .bind(device_id)
            .bind(&event.event_type)
            .bind(&event.payload)
            .bind(event.created_at)
            .execute(&mut *tx)
            .await?;
            written += result.rows_affected();
        }

        sqlx::query("UPDATE devices SET last_seen_at = NOW() WHERE id = $1")
            .bind(device_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(written)
    }

    /// List a user's events, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<TelemetryEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, TelemetryEvent>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Count a user's events per type created at or after `since`.
    pub async fn count_by_type_since(
        pool: &PgPool,
        user_id: DbId,
        since: Timestamp,
    ) -> Result<Vec<TypeCount>, sqlx::Error> {
        sqlx::query_as::<_, TypeCount>(
            "SELECT event_type, COUNT(*) AS count FROM events
             WHERE user_id = $1 AND created_at >= $2
             GROUP BY event_type
             ORDER BY event_type",
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(pool)
        .await
    }
}
