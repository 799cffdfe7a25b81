use thiserror::Error;

/// Error types for CAPTCHA token verification
#[derive(Debug, Error)]
pub enum CaptchaError {
    /// The token was missing or empty; no remote call is made
    #[error("Captcha token not provided")]
    TokenNotProvided,

    /// The verifier is missing its shared secret; no remote call is made
    #[error("Captcha verifier is not configured: {0} is not set")]
    NotConfigured(&'static str),

    /// The provider rejected the token
    #[error("Captcha verification failed: {reason}")]
    Rejected {
        /// Joined `error-codes` from the siteverify response, or "unknown"
        reason: String,
    },

    /// Network error when communicating with the siteverify endpoint
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
