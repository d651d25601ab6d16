pub mod auth;
pub mod config;
pub mod devices;
pub mod events;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/request-otp          issue login code (public)
/// /auth/verify-otp           exchange code for session (public)
/// /auth/logout               revoke current session (requires auth)
///
/// /devices                   list own devices (requires auth)
/// /devices/bind              bind a device (requires auth)
///
/// /config                    get, update settings (requires auth)
///
/// /events                    append batch, list recent (requires auth)
/// /trends                    per-type counts over 7d / 30d (requires auth)
///
/// /support                   contact form (public, token optional)
/// /app-links                 store-listing links (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/devices", devices::router())
        .nest("/config", config::router())
        .nest("/events", events::router())
        .route("/trends", get(handlers::trends::get_trends))
        .route("/support", post(handlers::support::submit_support))
        .route("/app-links", get(handlers::app_links::get_app_links))
}
