use thiserror::Error;

/// Error types for World ID proof verification
#[derive(Debug, Error)]
pub enum WorldIdError {
    /// One or more proof fields were missing or empty; no remote call is made
    #[error("Proof not provided")]
    ProofNotProvided,

    /// A proof field failed local format validation
    #[error("Invalid proof data: {0}")]
    InvalidProofData(String),

    /// The Developer Portal rejected the proof
    #[error("{detail}")]
    Rejected {
        /// Detail from the portal's error response, or a status-derived message
        detail: String,
    },

    /// The verifier is missing required configuration; no remote call is made
    #[error("World ID verifier is not configured: {0} is not set")]
    NotConfigured(&'static str),

    /// Network error when communicating with the Developer Portal
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
