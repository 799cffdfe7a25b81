//! Wire types shared between the verification gateway and widget clients.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The verification family that produced an outcome.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// World ID proof of personhood
    WorldId,
    /// Google reCAPTCHA v2/v3
    Recaptcha,
    /// hCaptcha
    Hcaptcha,
    /// No verification family was applied (e.g. empty request)
    None,
}

impl Method {
    /// Human-readable name used in outcome messages shown to end users.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::WorldId => "World ID",
            Self::Recaptcha => "reCAPTCHA",
            Self::Hcaptcha => "hCaptcha",
            Self::None => "none",
        }
    }
}

/// A `CredentialType` represents a specific credential presented by a World ID holder.
///
/// Serialized names match `idkit-js` and the Developer Portal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CredentialType {
    /// Biometrically verified at an Orb. Highest level of proof of personhood.
    Orb,
    /// Verified biometric ICAO-9303 government-issued document holder
    Document,
    /// Document credential with additional presence checks
    SecureDocument,
    /// Represents a semi-unique device
    Device,
}

/// World ID proof fields as produced by IDKit on the client.
///
/// All hash fields are hex strings; they are opaque to this system and checked
/// by the remote identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProofPayload {
    /// Root of the World ID merkle tree the proof was generated against
    pub merkle_root: String,
    /// Nullifier hash, unique per (person, action) pair
    pub nullifier_hash: String,
    /// The packed zero-knowledge proof as a hex string
    pub proof: String,
    /// Credential the holder presented
    pub credential_type: CredentialType,
    /// Optional signal bound into the proof
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
}

/// A client-initiated verification attempt.
///
/// Either payload may be present; presence marks it as a candidate for
/// verification, it is never a request to verify both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VerifyRequest {
    /// World ID proof candidate, when the user completed IDKit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idkit_response: Option<ProofPayload>,
    /// CAPTCHA token candidate, when the user solved a challenge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha_token: Option<String>,
}

impl VerifyRequest {
    /// Whether the request carries no candidate payload at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.idkit_response.is_none() && self.captcha_token.is_none()
    }
}

/// Normalized result of a verification attempt, produced by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VerificationOutcome {
    /// Whether the attempt was accepted
    pub success: bool,
    /// The verification family that produced this outcome
    pub method: Method,
    /// Provider-sourced detail or a local failure reason
    pub message: String,
    /// Optional structured data returned by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl VerificationOutcome {
    /// A successful outcome for the given method.
    #[must_use]
    pub fn verified(method: Method, message: impl Into<String>) -> Self {
        Self {
            success: true,
            method,
            message: message.into(),
            details: None,
        }
    }

    /// A failed outcome for the given method.
    #[must_use]
    pub fn rejected(method: Method, message: impl Into<String>) -> Self {
        Self {
            success: false,
            method,
            message: message.into(),
            details: None,
        }
    }
}

/// Response envelope of the gateway's `POST /verify` endpoint.
///
/// The outcome message travels as `message` on success and as `error` on
/// failure, which is what widget clients expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VerifyResponse {
    /// Whether the attempt was accepted
    pub success: bool,
    /// Success detail, present only when `success` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Failure detail, present only when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The verification family that produced this outcome
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
    /// Optional structured data returned by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<VerificationOutcome> for VerifyResponse {
    fn from(outcome: VerificationOutcome) -> Self {
        let (message, error) = if outcome.success {
            (Some(outcome.message), None)
        } else {
            (None, Some(outcome.message))
        };

        Self {
            success: outcome.success,
            message,
            error,
            method: Some(outcome.method),
            details: outcome.details,
        }
    }
}

impl From<VerifyResponse> for VerificationOutcome {
    fn from(response: VerifyResponse) -> Self {
        let message = if response.success {
            response.message
        } else {
            response.error
        };

        Self {
            success: response.success,
            method: response.method.unwrap_or(Method::None),
            message: message.unwrap_or_default(),
            details: response.details,
        }
    }
}
