//! Handlers for the `/config` resource.
//!
//! The body of `PUT /config` is taken as raw JSON so that every supplied
//! field can be checked and reported individually, including unknown ones.

use axum::extract::State;
use axum::Json;
use cravex_core::device_config::{ConfigBounds, ConfigBundle, ConfigPatch, CONFIG_BOUNDS};
use cravex_core::types::DbId;
use cravex_db::repositories::ConfigRepo;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::response::OkResponse;
use crate::state::AppState;

/// Response for `GET /config`.
#[derive(Debug, Serialize)]
pub struct ConfigView {
    pub config: ConfigBundle,
    pub bounds: ConfigBounds,
}

#[derive(Debug, Serialize)]
pub struct ConfigUpdated {
    pub config: ConfigBundle,
}

/// GET /api/config
///
/// The caller's settings, or the defaults if nothing has been saved yet.
pub async fn get_config(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ConfigView>> {
    let config = load_bundle(&state, auth_user.user_id).await?;
    Ok(Json(ConfigView {
        config,
        bounds: CONFIG_BOUNDS,
    }))
}

/// PUT /api/config
///
/// Validate and merge a partial update. Nothing is written if any field is
/// rejected.
pub async fn put_config(
    State(state): State<AppState>,
    auth_user: AuthUser,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Json<OkResponse<ConfigUpdated>>> {
    let patch = ConfigPatch::from_json(&body)?;

    let config = if patch.is_empty() {
        load_bundle(&state, auth_user.user_id).await?
    } else {
        let merged = ConfigRepo::apply_patch(&state.pool, auth_user.user_id, &patch).await?;
        tracing::info!(user_id = auth_user.user_id, "Config updated");
        merged
    };

    Ok(Json(OkResponse::new(ConfigUpdated { config })))
}

async fn load_bundle(state: &AppState, user_id: DbId) -> AppResult<ConfigBundle> {
    match ConfigRepo::find_for_user(&state.pool, user_id).await? {
        Some(row) => Ok(ConfigBundle::from_stored(row.data)?),
        None => Ok(ConfigBundle::default()),
    }
}
