use std::env;

use thiserror::Error;

use crate::captcha::CaptchaProvider;
use crate::dispatch::Priority;

/// Default Developer Portal host for World ID proof verification
const DEFAULT_WORLD_ID_VERIFY_URL: &str = "https://developer.worldcoin.org";

/// Errors raised while loading the gateway configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `CAPTCHA_PROVIDER` holds a value other than `recaptcha` or `hcaptcha`
    #[error("Invalid captcha provider selector: {0}")]
    InvalidCaptchaProvider(String),

    /// `VERIFY_PRIORITY` holds a value other than `worldid` or `captcha`
    #[error("Invalid verification priority selector: {0}")]
    InvalidPriority(String),

    /// The selected captcha provider has no credentials while the other one does.
    /// Requests would be routed to a provider the deployment never set up.
    #[error("Captcha provider is set to {selected} but only {configured} credentials are present")]
    ProviderKeyMismatch {
        /// Provider named by `CAPTCHA_PROVIDER`
        selected: CaptchaProvider,
        /// Provider whose keys were actually found
        configured: CaptchaProvider,
    },
}

/// World ID verification settings
#[derive(Debug, Clone)]
pub struct WorldIdConfig {
    /// Developer Portal application id (`app_...`)
    pub app_id: Option<String>,
    /// Action id proofs must be generated for
    pub action: Option<String>,
    /// Developer Portal host, overridable for development
    pub verify_base_url: String,
}

/// CAPTCHA verification settings
#[derive(Debug, Clone)]
pub struct CaptchaConfig {
    /// Which CAPTCHA family the widget renders and the gateway verifies
    pub provider: CaptchaProvider,
    /// Client-exposed site key
    pub site_key: Option<String>,
    /// Server-only shared secret for the siteverify endpoint
    pub secret_key: Option<String>,
    /// Siteverify URL override for development
    pub siteverify_url: Option<String>,
}

/// Immutable gateway configuration, constructed once at process start and
/// injected into the dispatcher and adapters. The process environment is
/// never consulted again after construction.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// World ID verification settings
    pub world_id: WorldIdConfig,
    /// CAPTCHA verification settings
    pub captcha: CaptchaConfig,
    /// Which verification family is attempted first
    pub priority: Priority,
}

impl VerifierConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Missing credentials are not fatal here; the corresponding adapter
    /// reports a structured "not configured" failure per attempt. Invalid
    /// selector values and contradictory provider credentials are fatal.
    ///
    /// # Errors
    ///
    /// Returns an error when `CAPTCHA_PROVIDER` or `VERIFY_PRIORITY` hold
    /// unknown values, or when the selected provider has no credentials
    /// while the other provider does.
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider = match env::var("CAPTCHA_PROVIDER") {
            Ok(value) => value
                .trim()
                .to_lowercase()
                .parse::<CaptchaProvider>()
                .map_err(|_| ConfigError::InvalidCaptchaProvider(value))?,
            Err(_) => CaptchaProvider::Recaptcha,
        };

        let priority = match env::var("VERIFY_PRIORITY") {
            Ok(value) => value
                .trim()
                .to_lowercase()
                .parse::<Priority>()
                .map_err(|_| ConfigError::InvalidPriority(value))?,
            Err(_) => Priority::default(),
        };

        let site_key = non_empty_var(provider.site_key_var());
        let secret_key = non_empty_var(provider.secret_key_var());

        // A selector pointing at a family whose keys are absent while the
        // other family's keys are present silently misroutes every request.
        if site_key.is_none() && secret_key.is_none() {
            let other = provider.other();
            let other_has_keys = non_empty_var(other.site_key_var()).is_some()
                || non_empty_var(other.secret_key_var()).is_some();

            if other_has_keys {
                return Err(ConfigError::ProviderKeyMismatch {
                    selected: provider,
                    configured: other,
                });
            }
        }

        Ok(Self {
            world_id: WorldIdConfig {
                app_id: non_empty_var("WORLD_ID_APP_ID"),
                action: non_empty_var("WORLD_ID_ACTION"),
                verify_base_url: non_empty_var("WORLD_ID_VERIFY_URL")
                    .unwrap_or_else(|| DEFAULT_WORLD_ID_VERIFY_URL.to_string()),
            },
            captcha: CaptchaConfig {
                provider,
                site_key,
                secret_key,
                siteverify_url: non_empty_var("CAPTCHA_SITEVERIFY_URL"),
            },
            priority,
        })
    }

    /// Logs the credential gaps of the loaded configuration so operators see
    /// them at startup rather than on the first rejected request.
    pub fn validate(&self) {
        if self.world_id.app_id.is_none() || self.world_id.action.is_none() {
            tracing::warn!(
                "World ID verification is not configured; proof attempts will be rejected"
            );
        }

        if self.captcha.secret_key.is_none() {
            tracing::warn!(
                provider = %self.captcha.provider,
                "Captcha secret key is not configured; token attempts will be rejected"
            );
        }
    }
}

/// Reads an environment variable, treating empty values as unset
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
