//! Telemetry event rows and trend aggregates.

use cravex_core::types::{DbId, DeviceId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEvent {
    pub id: DbId,
    pub user_id: DbId,
    pub device_id: DeviceId,
    #[serde(rename = "type")]
    pub event_type: String,
    pub payload: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// Event count for one type within a trend window.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub event_type: String,
    pub count: i64,
}
