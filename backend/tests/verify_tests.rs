mod common;

use backend::captcha::verifier::mock::MockCaptchaVerifier;
use backend::dispatch::Priority;
use backend::world_id::verifier::mock::MockIdentityVerifier;
use common::{proof_json, TestContext};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_valid_proof_verifies_without_touching_captcha() {
    let context = TestContext::default();

    let response = context
        .post_json("/verify", &json!({ "idkit_response": proof_json() }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = TestContext::body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["method"], json!("world_id"));
    assert!(body["error"].is_null());

    assert_eq!(context.identity.calls(), 1);
    assert_eq!(context.captcha.calls(), 0);
}

#[tokio::test]
async fn test_token_only_request_returns_captcha_result() {
    let context = TestContext::default();

    let response = context
        .post_json("/verify", &json!({ "captcha_token": "widget-token" }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = TestContext::body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["method"], json!("recaptcha"));

    assert_eq!(context.identity.calls(), 0);
    assert_eq!(context.captcha.calls(), 1);
}

#[tokio::test]
async fn test_rejected_proof_falls_through_to_captcha() {
    let context = TestContext::new(
        MockIdentityVerifier::rejecting("invalid proof".to_string()),
        MockCaptchaVerifier::accepting(),
        Priority::IdentityFirst,
    );

    let response = context
        .post_json(
            "/verify",
            &json!({
                "idkit_response": proof_json(),
                "captcha_token": "widget-token",
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = TestContext::body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["method"], json!("recaptcha"));

    assert_eq!(context.identity.calls(), 1);
    assert_eq!(context.captcha.calls(), 1);
}

#[tokio::test]
async fn test_empty_request_is_a_client_usage_error() {
    let context = TestContext::default();

    let response = context.post_json("/verify", &json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = TestContext::body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["method"], json!("none"));
    assert_eq!(body["error"], json!("No verification payload provided."));

    assert_eq!(context.identity.calls(), 0);
    assert_eq!(context.captcha.calls(), 0);
}

#[tokio::test]
async fn test_captcha_first_priority_never_invokes_identity() {
    let context = TestContext::new(
        MockIdentityVerifier::accepting(),
        MockCaptchaVerifier::accepting(),
        Priority::CaptchaFirst,
    );

    let response = context
        .post_json(
            "/verify",
            &json!({
                "idkit_response": proof_json(),
                "captcha_token": "valid-token",
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = TestContext::body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["method"], json!("recaptcha"));

    assert_eq!(context.identity.calls(), 0);
    assert_eq!(context.captcha.calls(), 1);
}

#[tokio::test]
async fn test_rejected_proof_without_fallback_names_the_primary() {
    let context = TestContext::new(
        MockIdentityVerifier::rejecting("invalid proof".to_string()),
        MockCaptchaVerifier::accepting(),
        Priority::IdentityFirst,
    );

    let response = context
        .post_json("/verify", &json!({ "idkit_response": proof_json() }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = TestContext::body_json(response).await;
    assert_eq!(body["success"], json!(false));

    let error = body["error"].as_str().expect("error must be a string");
    assert!(error.contains("invalid proof"));
    assert!(error.contains("Primary method (World ID) failed."));

    assert_eq!(context.captcha.calls(), 0);
}

#[tokio::test]
async fn test_malformed_json_maps_to_bad_request() {
    let context = TestContext::default();

    let response = context
        .post_raw("/verify", "{not json", Some("application/json"))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = TestContext::body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Invalid JSON payload"));

    assert_eq!(context.identity.calls(), 0);
    assert_eq!(context.captcha.calls(), 0);
}

#[tokio::test]
async fn test_missing_content_type_maps_to_bad_request() {
    let context = TestContext::default();

    let response = context.post_raw("/verify", "{}", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = TestContext::body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["error"],
        json!("Missing Content-Type: application/json header")
    );
}
