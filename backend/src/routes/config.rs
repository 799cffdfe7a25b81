use std::sync::Arc;

use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::Serialize;

use crate::captcha::CaptchaProvider;
use crate::types::VerifierConfig;

#[derive(Debug, Serialize, JsonSchema)]
pub struct ConfigResponse {
    /// Selected CAPTCHA provider
    captcha_provider: CaptchaProvider,
    /// Client-exposed site key for the selected provider, when configured
    captcha_site_key: Option<String>,
    /// World ID application id the widget should request proofs for
    world_id_app_id: Option<String>,
    /// World ID action id the widget should request proofs for
    world_id_action: Option<String>,
    /// Which verification family the widget should offer first
    priority: String,
}

/// Client-exposed widget configuration.
///
/// Everything a widget needs to render; the secret key never appears here.
pub async fn handler(Extension(config): Extension<Arc<VerifierConfig>>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        captcha_provider: config.captcha.provider,
        captcha_site_key: config.captcha.site_key.clone(),
        world_id_app_id: config.world_id.app_id.clone(),
        world_id_action: config.world_id.action.clone(),
        priority: config.priority.to_string(),
    })
}
