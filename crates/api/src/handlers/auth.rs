//! Handlers for the `/auth` resource (request code, verify code, logout).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use cravex_core::error::CoreError;
use cravex_core::otp::{self, INVALID_CODE_MESSAGE};
use cravex_core::types::{DbId, Timestamp};
use cravex_db::models::session::CreateSession;
use cravex_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::otp::{hash_code, verify_code, verify_decoy};
use crate::auth::token::generate_session_token;
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::response::{Empty, OkResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/request-otp`.
#[derive(Debug, Deserialize)]
pub struct RequestOtpRequest {
    pub email: String,
}

/// Request body for `POST /auth/verify-otp`.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub code: String,
}

/// Issued session returned by a successful verification.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIssued {
    pub token: String,
    pub user_id: DbId,
    pub expires_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/request-otp
///
/// Issue a login code for `email`, creating the user on first contact.
/// Answers `{ok: true}` whether or not the email could be delivered; the code
/// is persisted before delivery is attempted.
pub async fn request_otp(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RequestOtpRequest>,
) -> AppResult<Json<OkResponse<Empty>>> {
    otp::validate_email(&input.email)?;

    let ttl_mins = state.config.auth.otp_ttl_mins;
    let issued = otp::issue_code(Utc::now(), ttl_mins);
    let code_hash = hash_code(&issued.code)
        .map_err(|e| AppError::InternalError(format!("Code hashing error: {e}")))?;

    let user = UserRepo::upsert_otp(&state.pool, &input.email, &code_hash, issued.expires_at)
        .await?;
    tracing::info!(user_id = user.id, "Login code issued");

    let email = cravex_notify::messages::login_code(&user.email, &issued.code, ttl_mins);
    if let Err(e) = state.mailer.send(&email).await {
        tracing::warn!(user_id = user.id, error = %e, "Login code delivery failed");
    }

    Ok(Json(OkResponse::empty()))
}

/// POST /api/auth/verify-otp
///
/// Exchange a live code for a session token. Every failure answers with the
/// same 401 so callers cannot tell an unknown email from a wrong or expired
/// code.
pub async fn verify_otp(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<VerifyOtpRequest>,
) -> AppResult<Json<OkResponse<SessionIssued>>> {
    let rejected = || AppError::Core(CoreError::Unauthorized(INVALID_CODE_MESSAGE.into()));

    if otp::validate_code_format(&input.code).is_err() {
        return Err(rejected());
    }

    // 1. Find the user. Unknown emails still pay for a hash check.
    let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? else {
        verify_decoy(&input.code);
        return Err(rejected());
    };

    // 2. Spend one attempt. Expired, missing, or burned codes yield nothing.
    let max_attempts = state.config.auth.otp_max_attempts;
    let Some(code_hash) =
        UserRepo::reserve_otp_attempt(&state.pool, user.id, max_attempts).await?
    else {
        verify_decoy(&input.code);
        return Err(rejected());
    };

    // 3. Compare against the stored hash.
    let matches = verify_code(&input.code, &code_hash)
        .map_err(|e| AppError::InternalError(format!("Code verification error: {e}")))?;
    if !matches {
        tracing::info!(user_id = user.id, "Login code rejected");
        return Err(rejected());
    }

    // 4. Consume; only one concurrent caller wins.
    if !UserRepo::consume_otp(&state.pool, user.id, &code_hash).await? {
        return Err(rejected());
    }

    // 5. Open a session.
    let now = Utc::now();
    let (token, token_hash) = generate_session_token();
    let expires_at = now + chrono::Duration::days(state.config.auth.session_ttl_days);
    let session = SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            token_hash,
            expires_at,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, session_id = session.id, "Session opened");

    Ok(Json(OkResponse::new(SessionIssued {
        token,
        user_id: user.id,
        expires_at: session.expires_at,
    })))
}

/// POST /api/auth/logout
///
/// Revoke the session the request was made with. Other sessions of the same
/// user stay valid.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<OkResponse<Empty>>> {
    SessionRepo::revoke(&state.pool, auth_user.session_id).await?;
    tracing::info!(
        user_id = auth_user.user_id,
        session_id = auth_user.session_id,
        "Session revoked"
    );
    Ok(Json(OkResponse::empty()))
}
