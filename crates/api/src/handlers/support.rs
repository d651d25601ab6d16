//! Handler for the public support form.

use axum::extract::State;
use axum::Json;
use cravex_core::support::ContactMessage;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::response::{Empty, OkResponse};
use crate::state::AppState;

/// POST /api/support
///
/// Forward a contact message to the support inbox. A bearer token is
/// optional; when it resolves, the account id is attached to the message.
pub async fn submit_support(
    State(state): State<AppState>,
    auth_user: Option<AuthUser>,
    JsonBody(input): JsonBody<ContactMessage>,
) -> AppResult<Json<OkResponse<Empty>>> {
    input.check()?;

    let user_id = auth_user.map(|u| u.user_id);
    let email = cravex_notify::messages::support_request(
        &state.config.support_recipients,
        &input,
        user_id,
    );
    state.mailer.send(&email).await?;

    tracing::info!(?user_id, "Support request forwarded");
    Ok(Json(OkResponse::empty()))
}
