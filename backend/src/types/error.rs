//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common_types::{Method, VerifyResponse};

/// Application error that renders as the verification response envelope.
///
/// All error paths of the HTTP surface produce the same `{success: false,
/// error, method}` body that widget clients already parse for dispatch
/// failures, so a malformed request and a rejected proof look alike on the
/// wire apart from the message.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// A 400 client-usage error
    #[must_use]
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    /// A generic 500 with no internal detail leaked to the client
    #[must_use]
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Internal server error",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {} - {}", self.code, self.message),
            500..=599 => tracing::error!("Server error: {} - {}", self.code, self.message),
            _ => {}
        }

        let body = VerifyResponse {
            success: false,
            message: None,
            error: Some(self.message),
            method: Some(Method::None),
            details: None,
        };

        (self.status, Json(body)).into_response()
    }
}

impl OperationOutput for AppError {
    type Inner = VerifyResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<VerifyResponse>::operation_response(ctx, operation)
    }
}
