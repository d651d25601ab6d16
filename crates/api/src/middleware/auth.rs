//! Session-token authentication extractor for Axum handlers.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use cravex_core::types::DbId;
use cravex_db::repositories::SessionRepo;

use crate::auth::token::{bearer_token, hash_session_token};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from a live session.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The session the request was made with.
    pub session_id: DbId,
}

/// Look up the session behind a raw token; `None` if unknown, revoked, or expired.
async fn resolve(state: &AppState, token: &str) -> Result<Option<AuthUser>, AppError> {
    let session =
        SessionRepo::find_active_by_token_hash(&state.pool, &hash_session_token(token)).await?;
    Ok(session.map(|s| AuthUser {
        user_id: s.user_id,
        session_id: s.id,
    }))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = bearer_token(auth_header).ok_or_else(|| {
            AppError::unauthorized("Invalid Authorization format. Expected: Bearer <token>")
        })?;

        resolve(state, token)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid or expired token"))
    }
}

/// A missing or unusable token yields `None`; only storage failures reject.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token);

        match token {
            Some(token) => resolve(state, token).await,
            None => Ok(None),
        }
    }
}
