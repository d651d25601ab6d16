//! HTTP-level integration tests for per-user settings.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

/// Patch then read returns the patched value, other fields at defaults.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_then_get(pool: PgPool) {
    let (app, mailer) = common::build_test_app(pool);
    let (token, _) = common::login(&app, &mailer, "cfg@x.com").await;

    let response = put_json_auth(
        app.clone(),
        "/api/config",
        json!({ "hapticIntensity": 70 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["config"]["hapticIntensity"], 70);

    let json = body_json(get_auth(app, "/api/config", &token).await).await;
    assert_eq!(json["config"]["hapticIntensity"], 70);
    assert_eq!(json["config"]["ledBrightness"], 50);
}

/// An out-of-range value is rejected and nothing is stored.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_out_of_bounds_rejected_without_write(pool: PgPool) {
    let (app, mailer) = common::build_test_app(pool.clone());
    let (token, user_id) = common::login(&app, &mailer, "cfg@x.com").await;

    let response = put_json_auth(
        app.clone(),
        "/api/config",
        json!({ "hapticIntensity": -1 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["details"][0]["field"], "hapticIntensity");

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM configs WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 0);
}

/// One bad field rejects the whole patch; every bad field is listed.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mixed_patch_rejected_whole(pool: PgPool) {
    let (app, mailer) = common::build_test_app(pool);
    let (token, _) = common::login(&app, &mailer, "cfg@x.com").await;

    put_json_auth(app.clone(), "/api/config", json!({ "ledBrightness": 10 }), &token).await;

    let response = put_json_auth(
        app.clone(),
        "/api/config",
        json!({
            "ledBrightness": 90,
            "sensitivity": "extreme",
            "hapticIntensity": 12.5,
            "volume": 3
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let fields: Vec<&str> = json["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["hapticIntensity", "sensitivity", "volume"]);

    let json = body_json(get_auth(app, "/api/config", &token).await).await;
    assert_eq!(json["config"]["ledBrightness"], 10);
}

/// Successive patches of different fields accumulate.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patches_merge_shallowly(pool: PgPool) {
    let (app, mailer) = common::build_test_app(pool);
    let (token, _) = common::login(&app, &mailer, "cfg@x.com").await;

    put_json_auth(app.clone(), "/api/config", json!({ "sensitivity": "high" }), &token).await;
    put_json_auth(
        app.clone(),
        "/api/config",
        json!({ "notificationsEnabled": false }),
        &token,
    )
    .await;

    let json = body_json(get_auth(app, "/api/config", &token).await).await;
    assert_eq!(
        json["config"],
        json!({
            "hapticIntensity": 50,
            "ledBrightness": 50,
            "sensitivity": "high",
            "notificationsEnabled": false
        })
    );
}

/// Settings are per user.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_config_is_scoped_to_user(pool: PgPool) {
    let (app, mailer) = common::build_test_app(pool);
    let (alice, _) = common::login(&app, &mailer, "alice@x.com").await;
    let (bob, _) = common::login(&app, &mailer, "bob@x.com").await;

    put_json_auth(app.clone(), "/api/config", json!({ "ledBrightness": 5 }), &alice).await;

    let json = body_json(get_auth(app, "/api/config", &bob).await).await;
    assert_eq!(json["config"]["ledBrightness"], 50);
}

/// A non-object body is a validation error, not a crash.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_object_body_rejected(pool: PgPool) {
    let (app, mailer) = common::build_test_app(pool);
    let (token, _) = common::login(&app, &mailer, "cfg@x.com").await;

    let response = put_json_auth(app, "/api/config", json!([1, 2]), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
