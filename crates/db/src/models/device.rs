//! Device model.

use cravex_core::types::{DbId, DeviceId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `devices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: DeviceId,
    pub user_id: DbId,
    pub label: Option<String>,
    pub last_seen_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
