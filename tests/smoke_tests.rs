//! End-to-end flow against a file-backed database.

use axum::{
    Router,
    body::{Body, Bytes},
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use qrforge::config::Config;
use qrforge::models::Role;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

async fn spawn_app(workdir: &tempfile::TempDir) -> (Arc<qrforge::api::AppState>, Router) {
    let db_path = workdir.path().join("qrforge-smoke.db");

    let mut config = Config::default();
    config.general.database_url = format!("sqlite:{}", db_path.display());
    config.security.jwt_secret = "smoke-test-signing-secret".to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config.storage.output_dir = workdir.path().join("qr").display().to_string();
    config.server.public_base_url = "https://qr.example.test".to_string();

    let state = qrforge::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");

    let router = qrforge::api::router(state.clone());
    (state, router)
}

async fn call(router: &Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn smoke_login_generate_download_customize_logout() {
    let workdir = tempfile::tempdir().unwrap();
    let (state, router) = spawn_app(&workdir).await;

    let user = state
        .store()
        .create_user("smoke@example.com", "smoke-pass", Role::Administrator, &state.config().security)
        .await
        .unwrap();

    let (status, bytes) = call(
        &router,
        post_json(
            "/auth/login",
            &json!({"email": "smoke@example.com", "password": "smoke-pass"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let login: Value = serde_json::from_slice(&bytes).unwrap();
    let token = login["access_token"].as_str().unwrap().to_string();

    let (status, bytes) = call(
        &router,
        post_json(
            "/generate",
            &json!({
                "data": "BEGIN:VCARD\nVERSION:3.0\nFN:Smoke Test\nEND:VCARD",
                "data_type": "VCARD",
                "size": 300,
                "color": "#003366",
                "error_correction": "Q",
                "user_id": user.id,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let generated: Value = serde_json::from_slice(&bytes).unwrap();
    let id = generated["qr_code_id"].as_str().unwrap().to_string();
    assert_eq!(
        generated["qr_code_url"],
        format!("https://qr.example.test/qr/{id}.png")
    );

    let (status, png) = call(
        &router,
        Request::builder()
            .uri(format!("/qr/{id}.png"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(png[..8], PNG_SIGNATURE);

    let (status, _) = call(
        &router,
        post_json(
            "/customize",
            &json!({"qr_code_id": id, "color": "#abc", "size": 640}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, bytes) = call(
        &router,
        Request::builder()
            .uri(format!(
                "/auth/permission/check?token={token}&action=create_qr_code"
            ))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let permission: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(permission["is_authorized"], true);

    let (status, bytes) = call(&router, post_json("/auth/logout", &json!({"token": token}))).await;
    assert_eq!(status, StatusCode::OK);
    let logout: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(logout["message"], "Successfully logged out.");
}

#[tokio::test]
async fn smoke_anonymous_generate_only_writes_file() {
    let workdir = tempfile::tempdir().unwrap();
    let (state, router) = spawn_app(&workdir).await;

    let (status, bytes) = call(
        &router,
        post_json(
            "/generate",
            &json!({
                "data": "plain text",
                "data_type": "TEXT",
                "size": 120,
                "color": "#000000",
                "error_correction": "L",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let generated: Value = serde_json::from_slice(&bytes).unwrap();
    let id = generated["qr_code_id"].as_str().unwrap();

    let file = workdir.path().join("qr").join(format!("{id}.png"));
    assert!(file.exists());
    assert!(state.store().get_qr_code(id).await.unwrap().is_none());
}

#[tokio::test]
async fn smoke_unknown_rendered_file_is_404() {
    let workdir = tempfile::tempdir().unwrap();
    let (_, router) = spawn_app(&workdir).await;

    let (status, _) = call(
        &router,
        Request::builder()
            .uri("/qr/missing.png")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn smoke_metrics_without_recorder() {
    let workdir = tempfile::tempdir().unwrap();
    let (_, router) = spawn_app(&workdir).await;

    let (status, bytes) = call(
        &router,
        Request::builder().uri("/metrics").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&bytes).contains("Metrics not enabled"));
}
