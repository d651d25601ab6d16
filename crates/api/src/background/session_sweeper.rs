//! Periodic removal of expired and revoked sessions.
//!
//! Expired sessions are already refused by the bearer extractor; the sweep
//! only keeps the `sessions` table from growing without bound.

use std::time::Duration;

use cravex_db::repositories::SessionRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Run the sweep loop every `interval` until `cancel` is triggered.
///
/// The first sweep happens immediately on start.
pub async fn run(pool: PgPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Session sweeper started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session sweeper stopping");
                break;
            }
            _ = ticker.tick() => {
                match SessionRepo::cleanup_expired(&pool).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Session sweeper: purged sessions");
                    }
                    Ok(_) => tracing::debug!("Session sweeper: nothing to purge"),
                    Err(e) => {
                        tracing::error!(error = %e, "Session sweeper: cleanup failed");
                    }
                }
            }
        }
    }
}
