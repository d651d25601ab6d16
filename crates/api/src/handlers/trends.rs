//! Handler for `GET /trends`.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use cravex_core::telemetry::TrendRange;
use cravex_core::types::Timestamp;
use cravex_db::models::telemetry::TypeCount;
use cravex_db::repositories::TelemetryRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::QueryParams;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TrendParams {
    pub range: Option<String>,
}

/// Per-type event counts over a trailing window.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub range: &'static str,
    pub start_date: Timestamp,
    pub summary: Vec<TypeCount>,
}

/// GET /api/trends?range=7d|30d
pub async fn get_trends(
    State(state): State<AppState>,
    auth_user: AuthUser,
    QueryParams(params): QueryParams<TrendParams>,
) -> AppResult<Json<TrendSummary>> {
    let range = TrendRange::parse(params.range.as_deref())?;
    let start_date = range.window_start(Utc::now());

    let summary =
        TelemetryRepo::count_by_type_since(&state.pool, auth_user.user_id, start_date).await?;

    Ok(Json(TrendSummary {
        range: range.as_str(),
        start_date,
        summary,
    }))
}
