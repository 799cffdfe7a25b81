use std::sync::Arc;

use aide::axum::IntoApiResponse;
use axum::{http::StatusCode, Extension, Json};
use common_types::{VerifyRequest, VerifyResponse};

use crate::dispatch::Dispatcher;
use crate::types::ApiJson;

/// Verifies a human-verification payload against the configured providers.
///
/// Accepts a World ID proof, a CAPTCHA token, or both; the dispatcher decides
/// the order. Returns 200 with the outcome on success, 400 with the outcome
/// on any client-supplied-payload failure (missing payload, provider
/// rejection, unconfigured provider).
pub async fn handler(
    Extension(dispatcher): Extension<Arc<Dispatcher>>,
    ApiJson(request): ApiJson<VerifyRequest>,
) -> impl IntoApiResponse {
    let outcome = dispatcher.dispatch(&request).await;

    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    (status, Json(VerifyResponse::from(outcome)))
}
