//! Custom extractors for request parsing

use aide::operation::OperationInput;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use schemars::JsonSchema;

use crate::types::error::AppError;

/// JSON extractor that maps body rejections to the gateway's error envelope.
///
/// Malformed JSON and a missing content type are client-usage errors (400),
/// never 500s.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: serde::de::DeserializeOwned + JsonSchema,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| match err {
                JsonRejection::MissingJsonContentType(_) => AppError::bad_request(
                    "invalid_content_type",
                    "Missing Content-Type: application/json header",
                ),
                _ => AppError::bad_request("invalid_json", "Invalid JSON payload"),
            })?;

        Ok(Self(payload))
    }
}

impl<T> OperationInput for ApiJson<T>
where
    T: JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        // Delegate to Json<T>'s implementation since ApiJson has the same body shape
        Json::<T>::operation_input(ctx, operation);
    }
}
