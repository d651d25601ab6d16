//! Stored settings row.

use cravex_core::types::{DbId, DeviceId, Timestamp};
use sqlx::FromRow;

/// A row from the `configs` table. `data` holds a serialized
/// [`cravex_core::device_config::ConfigBundle`].
#[derive(Debug, Clone, FromRow)]
pub struct DeviceConfig {
    pub id: DbId,
    pub user_id: DbId,
    pub device_id: Option<DeviceId>,
    pub data: serde_json::Value,
    pub updated_at: Timestamp,
}
