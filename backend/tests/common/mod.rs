use std::sync::Arc;

use aide::openapi::OpenApi;
use axum::body::Body;
use axum::{Extension, Router};
use backend::captcha::verifier::mock::MockCaptchaVerifier;
use backend::captcha::{CaptchaProvider, CaptchaVerifier};
use backend::dispatch::{Dispatcher, Priority};
use backend::routes;
use backend::types::{CaptchaConfig, Environment, VerifierConfig, WorldIdConfig};
use backend::world_id::verifier::mock::MockIdentityVerifier;
use backend::world_id::verifier::IdentityVerifier;
use http::header::CONTENT_TYPE;
use http::{Request, Response};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Router wired with mock adapters, mirroring the production wiring in
/// `server::start` minus the listener.
pub struct TestContext {
    router: Router,
    pub identity: Arc<MockIdentityVerifier>,
    pub captcha: Arc<MockCaptchaVerifier>,
}

impl TestContext {
    pub fn new(
        identity: MockIdentityVerifier,
        captcha: MockCaptchaVerifier,
        priority: Priority,
    ) -> Self {
        let identity = Arc::new(identity);
        let captcha = Arc::new(captcha);

        let dispatcher = Arc::new(Dispatcher::new(
            identity.clone() as Arc<dyn IdentityVerifier>,
            captcha.clone() as Arc<dyn CaptchaVerifier>,
            priority,
        ));

        let mut openapi = OpenApi::default();
        let router = routes::handler()
            .finish_api(&mut openapi)
            .layer(Extension(openapi))
            .layer(Extension(Environment::Development))
            .layer(Extension(Arc::new(test_config(priority))))
            .layer(Extension(dispatcher));

        Self {
            router,
            identity,
            captcha,
        }
    }

    pub fn default() -> Self {
        Self::new(
            MockIdentityVerifier::accepting(),
            MockCaptchaVerifier::accepting(),
            Priority::IdentityFirst,
        )
    }

    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    pub async fn post_raw(&self, uri: &str, body: &str, content_type: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }

        let request = builder
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        serde_json::from_slice(&bytes).expect("Response body is not valid JSON")
    }
}

fn test_config(priority: Priority) -> VerifierConfig {
    VerifierConfig {
        world_id: WorldIdConfig {
            app_id: Some("app_staging_509648994ab005fe79c4ddd0449606ca".to_string()),
            action: Some("verify-human".to_string()),
            verify_base_url: "https://developer.worldcoin.org".to_string(),
        },
        captcha: CaptchaConfig {
            provider: CaptchaProvider::Recaptcha,
            site_key: Some("test-site-key".to_string()),
            secret_key: Some("test-secret-key".to_string()),
            siteverify_url: None,
        },
        priority,
    }
}

pub fn proof_json() -> serde_json::Value {
    serde_json::json!({
        "merkle_root": format!("0x{}", "2".repeat(64)),
        "nullifier_hash": format!("0x{}", "1".repeat(64)),
        "proof": format!("0x{}", "a".repeat(512)),
        "credential_type": "orb",
    })
}
