//! Handlers for the `/devices` resource.

use axum::extract::State;
use axum::Json;
use cravex_core::device::{normalize_label, parse_device_id, DEFAULT_DEVICE_LABEL};
use cravex_core::error::CoreError;
use cravex_db::models::device::Device;
use cravex_db::repositories::DeviceRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::response::OkResponse;
use crate::state::AppState;

/// Request body for `POST /devices/bind`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindDeviceRequest {
    pub device_id: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BoundDevice {
    pub device: Device,
}

#[derive(Debug, Serialize)]
pub struct DeviceList {
    pub devices: Vec<Device>,
}

/// POST /api/devices/bind
///
/// Bind a device to the caller. Re-binding one's own device refreshes it;
/// a device owned by anyone else is a 409.
pub async fn bind_device(
    State(state): State<AppState>,
    auth_user: AuthUser,
    JsonBody(input): JsonBody<BindDeviceRequest>,
) -> AppResult<Json<OkResponse<BoundDevice>>> {
    let device_id = parse_device_id(&input.device_id)?;
    let label = normalize_label(input.label.as_deref())?;

    let device = DeviceRepo::bind(
        &state.pool,
        device_id,
        auth_user.user_id,
        label.as_deref(),
        DEFAULT_DEVICE_LABEL,
    )
    .await?
    .ok_or_else(|| {
        tracing::warn!(
            user_id = auth_user.user_id,
            %device_id,
            "Bind refused: device owned by another user"
        );
        AppError::Core(CoreError::Conflict(
            "Device already bound to another user".into(),
        ))
    })?;

    tracing::info!(user_id = auth_user.user_id, %device_id, "Device bound");
    Ok(Json(OkResponse::new(BoundDevice { device })))
}

/// GET /api/devices
pub async fn list_devices(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DeviceList>> {
    let devices = DeviceRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(DeviceList { devices }))
}
