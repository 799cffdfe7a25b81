use async_trait::async_trait;
use common_types::{CredentialType, ProofPayload};
use serde::{Deserialize, Serialize};

use crate::types::WorldIdConfig;

use super::{error::WorldIdError, request::Request};

/// Verifies World ID proofs behind a uniform outcome shape.
///
/// The production implementation talks to the Developer Portal; tests swap in
/// a mock so no proof ever leaves the process.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verifies a single proof payload.
    ///
    /// # Errors
    ///
    /// Returns a [`WorldIdError`] describing the local validation failure,
    /// missing configuration, portal rejection, or transport fault. Errors
    /// never propagate past the dispatcher.
    async fn verify_proof(&self, proof: &ProofPayload) -> Result<(), WorldIdError>;
}

/// Request body for the Developer Portal's per-application verify endpoint.
///
/// [API reference](https://docs.world.org/world-id/reference/api#verify-proof)
#[derive(Serialize)]
struct PortalVerificationRequest<'a> {
    /// The merkle root of the World ID tree
    merkle_root: &'a str,
    /// The nullifier hash preventing proof reuse per action
    nullifier_hash: &'a str,
    /// The packed Zero-Knowledge proof
    proof: &'a str,
    /// Credential the holder presented
    credential_type: CredentialType,
    /// The action the proof was generated for, held server-side
    action: &'a str,
    /// The signal bound into the proof, empty string when unset
    signal: &'a str,
}

/// Error body returned by the portal on rejection.
#[derive(Debug, Deserialize)]
struct PortalErrorResponse {
    /// Human-readable rejection reason
    detail: Option<String>,
}

/// Adapter for the World ID Developer Portal verify API.
pub struct DeveloperPortalVerifier {
    config: WorldIdConfig,
}

impl DeveloperPortalVerifier {
    /// Creates a verifier over the given World ID configuration
    #[must_use]
    pub const fn new(config: WorldIdConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl IdentityVerifier for DeveloperPortalVerifier {
    async fn verify_proof(&self, proof: &ProofPayload) -> Result<(), WorldIdError> {
        let app_id = self
            .config
            .app_id
            .as_deref()
            .ok_or(WorldIdError::NotConfigured("WORLD_ID_APP_ID"))?;
        let action = self
            .config
            .action
            .as_deref()
            .ok_or(WorldIdError::NotConfigured("WORLD_ID_ACTION"))?;

        if proof.proof.trim().is_empty() {
            return Err(WorldIdError::ProofNotProvided);
        }
        let merkle_root = validate_and_normalize_hash(&proof.merkle_root, "Merkle root")?;
        let nullifier_hash = validate_and_normalize_hash(&proof.nullifier_hash, "Nullifier hash")?;

        let body = PortalVerificationRequest {
            merkle_root: &merkle_root,
            nullifier_hash: &nullifier_hash,
            proof: &proof.proof,
            credential_type: proof.credential_type,
            action,
            signal: proof.signal.as_deref().unwrap_or(""),
        };

        let url = format!(
            "{}/api/v2/verify/{app_id}",
            self.config.verify_base_url.trim_end_matches('/')
        );

        let response = Request::post(&url, &body).await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body_text = response.text().await.unwrap_or_default();
        Err(WorldIdError::Rejected {
            detail: rejection_detail(status, &body_text),
        })
    }
}

/// Extracts the failure detail from a portal rejection.
///
/// The portal's `detail` field wins when present; anything else (empty body,
/// non-JSON body) falls back to a status-derived message.
fn rejection_detail(status: reqwest::StatusCode, body_text: &str) -> String {
    serde_json::from_str::<PortalErrorResponse>(body_text)
        .ok()
        .and_then(|error| error.detail)
        .unwrap_or_else(|| format!("Proof verification failed with status {status}"))
}

/// Validates and normalizes a hex hash field (merkle root or nullifier hash).
///
/// Ensures the value:
/// - Starts with '0x'
/// - Is exactly 66 characters long (0x + 64 hex chars)
/// - Contains only hexadecimal characters after the prefix
///
/// Returns the lowercase normalized value on success. Empty fields map to
/// [`WorldIdError::ProofNotProvided`] so the caller sees the same failure as
/// an absent proof.
fn validate_and_normalize_hash(value: &str, field: &str) -> Result<String, WorldIdError> {
    if value.trim().is_empty() {
        return Err(WorldIdError::ProofNotProvided);
    }

    let lowercased = value.to_lowercase();

    if !lowercased.starts_with("0x") {
        return Err(WorldIdError::InvalidProofData(format!(
            "{field} must start with 0x"
        )));
    }

    if lowercased.len() != 66 {
        return Err(WorldIdError::InvalidProofData(format!(
            "{field} must be 66 characters long"
        )));
    }

    if !lowercased[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(WorldIdError::InvalidProofData(format!(
            "{field} must contain only hexadecimal characters"
        )));
    }

    Ok(lowercased)
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use common_types::ProofPayload;

    use super::{IdentityVerifier, WorldIdError};

    /// Scripted identity verifier that records how often it was invoked.
    pub struct MockIdentityVerifier {
        rejection: Option<String>,
        calls: AtomicUsize,
    }

    impl MockIdentityVerifier {
        /// A verifier that accepts every proof
        #[must_use]
        pub const fn accepting() -> Self {
            Self {
                rejection: None,
                calls: AtomicUsize::new(0),
            }
        }

        /// A verifier that rejects every proof with the given detail
        #[must_use]
        pub const fn rejecting(detail: String) -> Self {
            Self {
                rejection: Some(detail),
                calls: AtomicUsize::new(0),
            }
        }

        /// How many times `verify_proof` was invoked
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl IdentityVerifier for MockIdentityVerifier {
        async fn verify_proof(&self, _proof: &ProofPayload) -> Result<(), WorldIdError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            self.rejection.as_ref().map_or(Ok(()), |detail| {
                Err(WorldIdError::Rejected {
                    detail: detail.clone(),
                })
            })
        }
    }
}
