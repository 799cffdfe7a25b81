use std::time::Duration;

use async_trait::async_trait;
use common_types::Method;
use reqwest::Client;
use serde::Deserialize;

use crate::types::CaptchaConfig;

use super::error::CaptchaError;

/// Default timeout for siteverify requests
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of idle connections to maintain per host
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;

/// Verifies CAPTCHA tokens behind a uniform outcome shape.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// The outcome method tag of the configured provider
    fn method(&self) -> Method;

    /// Redeems a single widget token against the provider.
    ///
    /// # Errors
    ///
    /// Returns a [`CaptchaError`] describing the local validation failure,
    /// missing configuration, provider rejection, or transport fault. Errors
    /// never propagate past the dispatcher.
    async fn verify_token(&self, token: &str) -> Result<(), CaptchaError>;
}

/// Response of the siteverify endpoint. Both providers share this shape; the
/// auxiliary fields they add beyond it are ignored.
#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Adapter for the reCAPTCHA / hCaptcha siteverify API.
pub struct SiteVerifyClient {
    config: CaptchaConfig,
    http_client: Client,
}

impl SiteVerifyClient {
    /// Creates a client over the given CAPTCHA configuration
    ///
    /// # Panics
    ///
    /// If the HTTP client fails to be created
    #[must_use]
    pub fn new(config: CaptchaConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .user_agent(format!("verification-gateway/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    fn endpoint(&self) -> &str {
        self.config
            .siteverify_url
            .as_deref()
            .unwrap_or_else(|| self.config.provider.siteverify_url())
    }
}

#[async_trait]
impl CaptchaVerifier for SiteVerifyClient {
    fn method(&self) -> Method {
        self.config.provider.method()
    }

    async fn verify_token(&self, token: &str) -> Result<(), CaptchaError> {
        if token.trim().is_empty() {
            return Err(CaptchaError::TokenNotProvided);
        }

        let secret = self
            .config
            .secret_key
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| CaptchaError::NotConfigured(self.config.provider.secret_key_var()))?;

        let response = self
            .http_client
            .post(self.endpoint())
            .form(&[("secret", secret), ("response", token)])
            .send()
            .await?;

        let body: SiteVerifyResponse = response.json().await?;

        if body.success {
            Ok(())
        } else {
            let reason = if body.error_codes.is_empty() {
                "unknown".to_string()
            } else {
                body.error_codes.join(", ")
            };
            Err(CaptchaError::Rejected { reason })
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use common_types::Method;

    use super::{CaptchaError, CaptchaVerifier};

    /// Scripted captcha verifier that records how often it was invoked.
    pub struct MockCaptchaVerifier {
        method: Method,
        rejection: Option<String>,
        calls: AtomicUsize,
    }

    impl MockCaptchaVerifier {
        /// A reCAPTCHA-tagged verifier that accepts every token
        #[must_use]
        pub const fn accepting() -> Self {
            Self {
                method: Method::Recaptcha,
                rejection: None,
                calls: AtomicUsize::new(0),
            }
        }

        /// A reCAPTCHA-tagged verifier that rejects every token
        #[must_use]
        pub const fn rejecting(reason: String) -> Self {
            Self {
                method: Method::Recaptcha,
                rejection: Some(reason),
                calls: AtomicUsize::new(0),
            }
        }

        /// Overrides the provider tag reported by the mock
        #[must_use]
        pub const fn with_method(mut self, method: Method) -> Self {
            self.method = method;
            self
        }

        /// How many times `verify_token` was invoked
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl CaptchaVerifier for MockCaptchaVerifier {
        fn method(&self) -> Method {
            self.method
        }

        async fn verify_token(&self, _token: &str) -> Result<(), CaptchaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            self.rejection.as_ref().map_or(Ok(()), |reason| {
                Err(CaptchaError::Rejected {
                    reason: reason.clone(),
                })
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use common_types::Method;

    use super::*;
    use crate::captcha::CaptchaProvider;

    fn client(secret: Option<&str>) -> SiteVerifyClient {
        SiteVerifyClient::new(CaptchaConfig {
            provider: CaptchaProvider::Recaptcha,
            site_key: Some("site-key".to_string()),
            secret_key: secret.map(ToString::to_string),
            // Unroutable; local failures must trigger before any connection
            siteverify_url: Some("http://127.0.0.1:9".to_string()),
        })
    }

    #[tokio::test]
    async fn test_missing_secret_fails_without_network() {
        let result = client(None).verify_token("some-token").await;

        assert!(matches!(
            result,
            Err(CaptchaError::NotConfigured("RECAPTCHA_SECRET_KEY"))
        ));
    }

    #[tokio::test]
    async fn test_empty_token_fails_without_network() {
        let result = client(Some("secret")).verify_token("").await;

        assert!(matches!(result, Err(CaptchaError::TokenNotProvided)));
    }

    #[test]
    fn test_method_follows_provider() {
        assert_eq!(client(Some("secret")).method(), Method::Recaptcha);
    }

    #[test]
    fn test_siteverify_response_parses_error_codes() {
        let body: SiteVerifyResponse = serde_json::from_str(
            r#"{"success": false, "error-codes": ["invalid-input-response", "timeout-or-duplicate"]}"#,
        )
        .unwrap();

        assert!(!body.success);
        assert_eq!(
            body.error_codes,
            vec!["invalid-input-response", "timeout-or-duplicate"]
        );
    }

    #[test]
    fn test_siteverify_response_defaults_missing_error_codes() {
        let body: SiteVerifyResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();

        assert!(body.success);
        assert!(body.error_codes.is_empty());
    }
}
