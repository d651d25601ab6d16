//! Store-listing links for the marketing site and mobile shell.

use axum::extract::State;
use axum::Json;

use crate::config::AppLinks;
use crate::state::AppState;

/// GET /api/app-links
pub async fn get_app_links(State(state): State<AppState>) -> Json<AppLinks> {
    Json(state.config.app_links.clone())
}
