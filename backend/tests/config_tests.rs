mod common;

use common::TestContext;
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health_reports_ok() {
    let context = TestContext::default();

    let response = context.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = TestContext::body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
    assert!(body["semver"].is_string());
}

#[tokio::test]
async fn test_config_exposes_widget_settings() {
    let context = TestContext::default();

    let response = context.get("/config").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = TestContext::body_json(response).await;
    assert_eq!(body["captcha_provider"], json!("recaptcha"));
    assert_eq!(body["captcha_site_key"], json!("test-site-key"));
    assert_eq!(body["world_id_action"], json!("verify-human"));
    assert_eq!(body["priority"], json!("worldid"));
}

#[tokio::test]
async fn test_config_never_leaks_the_secret_key() {
    let context = TestContext::default();

    let response = context.get("/config").await;
    let body = TestContext::body_json(response).await;

    let serialized = body.to_string();
    assert!(!serialized.contains("test-secret-key"));
    assert!(!serialized.contains("secret_key"));
}
