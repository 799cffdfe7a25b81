//! HTTP client for the gateway's verification endpoint.

use std::time::Duration;

use async_trait::async_trait;
use common_types::{VerificationOutcome, VerifyRequest, VerifyResponse};
use reqwest::Client;
use thiserror::Error;

/// Default timeout for gateway requests
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of idle connections to maintain per host
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;

/// Errors talking to the verification gateway
#[derive(Debug, Error)]
pub enum DispatchApiError {
    /// Network error reaching the gateway
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The gateway answered with something other than the outcome envelope
    #[error("Unexpected gateway response: {0}")]
    UnexpectedResponse(String),
}

/// Submits verification payloads to the gateway.
///
/// The session only sees this trait; tests swap in a mock so no request ever
/// leaves the process.
#[async_trait]
pub trait DispatchApi: Send + Sync {
    /// Submits one verification attempt and returns the normalized outcome.
    ///
    /// A rejected payload is NOT an error here: the gateway answers 400 with
    /// a structured outcome, which is returned as `Ok`. Errors are reserved
    /// for transport faults and unparseable responses.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchApiError`] on transport faults or when the
    /// response body is not the outcome envelope.
    async fn verify(&self, request: &VerifyRequest)
        -> Result<VerificationOutcome, DispatchApiError>;
}

/// Implements [`DispatchApi`] over HTTP against a gateway deployment.
pub struct HttpDispatchClient {
    gateway_url: String,
    http_client: Client,
}

impl HttpDispatchClient {
    /// Creates a new gateway client
    ///
    /// # Panics
    ///
    /// If the HTTP client fails to be created
    #[must_use]
    pub fn new(gateway_url: String) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .user_agent(format!("verification-widget/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            gateway_url,
            http_client,
        }
    }
}

#[async_trait]
impl DispatchApi for HttpDispatchClient {
    async fn verify(
        &self,
        request: &VerifyRequest,
    ) -> Result<VerificationOutcome, DispatchApiError> {
        let url = format!("{}/verify", self.gateway_url.trim_end_matches('/'));

        let response = self.http_client.post(url).json(request).send().await?;

        // 400s carry a structured outcome; only the body shape matters here
        let status = response.status();
        let bytes = response.bytes().await?;

        let envelope: VerifyResponse = serde_json::from_slice(&bytes).map_err(|_| {
            DispatchApiError::UnexpectedResponse(format!(
                "status {status} with a non-outcome body"
            ))
        })?;

        Ok(VerificationOutcome::from(envelope))
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use common_types::{Method, VerificationOutcome};

    use super::{async_trait, DispatchApi, DispatchApiError, VerifyRequest};

    /// Scripted gateway client that records how often it was invoked.
    pub struct MockDispatchApi {
        outcome: VerificationOutcome,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl MockDispatchApi {
        /// A gateway that accepts every attempt as World ID
        #[must_use]
        pub fn accepting() -> Self {
            Self::with_outcome(VerificationOutcome::verified(
                Method::WorldId,
                "World ID verification successful",
            ))
        }

        /// A gateway that returns the given outcome for every attempt
        #[must_use]
        pub const fn with_outcome(outcome: VerificationOutcome) -> Self {
            Self {
                outcome,
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }

        /// Delays every response, for exercising session timeouts
        #[must_use]
        pub const fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// How many times `verify` was invoked
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DispatchApi for MockDispatchApi {
        async fn verify(
            &self,
            _request: &VerifyRequest,
        ) -> Result<VerificationOutcome, DispatchApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            Ok(self.outcome.clone())
        }
    }
}
