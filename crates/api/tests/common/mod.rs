#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use cravex_api::config::{AppLinks, AuthConfig, ServerConfig};
use cravex_api::router::build_app_router;
use cravex_api::state::AppState;
use cravex_notify::{EmailError, Mailer, OutgoingEmail};

// ---------------------------------------------------------------------------
// Recording mailer
// ---------------------------------------------------------------------------

/// Captures outgoing email instead of delivering it. With `failing` set,
/// every send is recorded and then reported as a delivery failure.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    failing: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// The code carried by the most recent login email sent to `to`.
    pub fn last_code_for(&self, to: &str) -> String {
        let sent = self.sent.lock().unwrap();
        let email = sent
            .iter()
            .rev()
            .find(|e| e.to.iter().any(|t| t == to))
            .unwrap_or_else(|| panic!("no email sent to {to}"));
        extract_code(&email.body).expect("login email must carry a 6-digit code")
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(email.clone());
        if self.failing {
            return Err(EmailError::Build("recording mailer set to fail".into()));
        }
        Ok(())
    }
}

/// First run of exactly six ASCII digits in `text`.
pub fn extract_code(text: &str) -> Option<String> {
    text.split(|c: char| !c.is_ascii_digit())
        .find(|run| run.len() == 6)
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_sweep_interval_secs: 3600,
        auth: AuthConfig::default(),
        support_recipients: vec!["support@test.local".to_string()],
        app_links: AppLinks {
            app_store: Some("https://apps.example.com/cravex".to_string()),
            play_store: None,
        },
    }
}

/// Build the full application router around `pool` with a fresh
/// [`RecordingMailer`], returned alongside so tests can read sent codes.
pub fn build_test_app(pool: PgPool) -> (Router, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    let app = build_test_app_with_mailer(pool, mailer.clone());
    (app, mailer)
}

/// Build the full application router with a caller-supplied mailer.
pub fn build_test_app_with_mailer(pool: PgPool, mailer: Arc<RecordingMailer>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Body,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Body::empty()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Body::from(body.to_string())).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Body::from(body.to_string())).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Body::from(body.to_string())).await
}

/// POST a raw (possibly malformed) body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    send(app, Method::POST, uri, None, Body::from(body)).await
}

// ---------------------------------------------------------------------------
// Flow helpers
// ---------------------------------------------------------------------------

/// Run the full code login for `email` and return `(token, user_id)`.
pub async fn login(app: &Router, mailer: &RecordingMailer, email: &str) -> (String, i64) {
    let response = post_json(
        app.clone(),
        "/api/auth/request-otp",
        serde_json::json!({ "email": email }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let code = mailer.last_code_for(email);
    let response = post_json(
        app.clone(),
        "/api/auth/verify-otp",
        serde_json::json!({ "email": email, "code": code }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    (
        json["token"].as_str().unwrap().to_string(),
        json["userId"].as_i64().unwrap(),
    )
}

/// Bind `device_id` for the holder of `token`, asserting success.
pub async fn bind(app: &Router, token: &str, device_id: &str) {
    let response = post_json_auth(
        app.clone(),
        "/api/devices/bind",
        serde_json::json!({ "deviceId": device_id }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
