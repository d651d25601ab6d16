//! Handlers for the `/events` resource (telemetry ingestion and listing).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use cravex_core::device::parse_device_id;
use cravex_core::error::CoreError;
use cravex_core::telemetry::{event_list_limit, validate_batch, EventItem};
use cravex_db::models::telemetry::TelemetryEvent;
use cravex_db::repositories::{DeviceRepo, TelemetryRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, QueryParams};
use crate::middleware::auth::AuthUser;
use crate::response::OkResponse;
use crate::state::AppState;

/// Request body for `POST /events`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendEventsRequest {
    pub device_id: String,
    pub events: Vec<EventItem>,
}

#[derive(Debug, Serialize)]
pub struct Appended {
    pub count: u64,
}

/// Query parameters for `GET /events`.
#[derive(Debug, Deserialize)]
pub struct ListEventsParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct EventList {
    pub events: Vec<TelemetryEvent>,
}

/// POST /api/events
///
/// Append a batch for one of the caller's devices. The whole batch is
/// rejected if any record is malformed, and a device the caller does not own
/// is reported as not found.
pub async fn append_events(
    State(state): State<AppState>,
    auth_user: AuthUser,
    JsonBody(input): JsonBody<AppendEventsRequest>,
) -> AppResult<Json<OkResponse<Appended>>> {
    let device_id = parse_device_id(&input.device_id)?;
    let events = validate_batch(input.events, Utc::now())?;

    DeviceRepo::find_owned(&state.pool, device_id, auth_user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Device",
                id: device_id.to_string(),
            })
        })?;

    let count =
        TelemetryRepo::insert_batch(&state.pool, auth_user.user_id, device_id, &events).await?;
    tracing::debug!(user_id = auth_user.user_id, %device_id, count, "Events appended");

    Ok(Json(OkResponse::new(Appended { count })))
}

/// GET /api/events?limit=N
///
/// The caller's most recent events, newest first.
pub async fn list_events(
    State(state): State<AppState>,
    auth_user: AuthUser,
    QueryParams(params): QueryParams<ListEventsParams>,
) -> AppResult<Json<EventList>> {
    let limit = event_list_limit(params.limit);
    let events = TelemetryRepo::list_for_user(&state.pool, auth_user.user_id, limit).await?;
    Ok(Json(EventList { events }))
}
