use std::sync::LazyLock;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use super::error::WorldIdError;

/// Default timeout for Developer Portal requests
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of idle connections to maintain per host
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;

/// Shared HTTP client with connection pooling for all proof verification
/// requests. Initialized once and reused.
static HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
        .user_agent(format!("verification-gateway/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
});

/// HTTP request handler for Developer Portal communication.
pub struct Request;

impl Request {
    /// Makes a POST request to the given URL with a JSON body.
    ///
    /// # Errors
    /// Returns an error if the request fails or the timeout elapses
    pub async fn post<T>(url: &str, body: T) -> Result<reqwest::Response, WorldIdError>
    where
        T: Serialize + Send + Sync,
    {
        HTTP_CLIENT
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verifies that the static initialization doesn't panic.
    #[test]
    fn test_http_client_initialization() {
        let _ = &*HTTP_CLIENT;
    }
}
