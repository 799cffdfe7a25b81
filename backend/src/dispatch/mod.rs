//! Priority-ordered verification dispatch.
//!
//! A request can carry a World ID proof, a CAPTCHA token, or both. The
//! dispatcher attempts the configured primary family first and falls through
//! to the fallback on failure or absence. The primary is never re-attempted;
//! reversing the order is a deployment decision made via configuration, not a
//! dynamic choice.

use std::sync::Arc;

use common_types::{Method, VerificationOutcome, VerifyRequest};
use strum::{Display, EnumString};

use crate::captcha::{CaptchaVerifier, SiteVerifyClient};
use crate::types::VerifierConfig;
use crate::world_id::verifier::{DeveloperPortalVerifier, IdentityVerifier};

/// Failure message for requests carrying no candidate payload at all.
/// A client-usage error, not a verification rejection.
pub const NO_PAYLOAD_MESSAGE: &str = "No verification payload provided.";

/// Which verification family is attempted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
pub enum Priority {
    /// World ID proof first, CAPTCHA as fallback
    #[default]
    #[strum(serialize = "worldid")]
    IdentityFirst,
    /// CAPTCHA first, World ID proof as fallback
    #[strum(serialize = "captcha")]
    CaptchaFirst,
}

/// One of the two candidate verification families of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Identity,
    Captcha,
}

/// Routes verification attempts to the identity and captcha adapters.
pub struct Dispatcher {
    identity: Arc<dyn IdentityVerifier>,
    captcha: Arc<dyn CaptchaVerifier>,
    priority: Priority,
}

impl Dispatcher {
    /// Creates a dispatcher over the given adapters
    #[must_use]
    pub fn new(
        identity: Arc<dyn IdentityVerifier>,
        captcha: Arc<dyn CaptchaVerifier>,
        priority: Priority,
    ) -> Self {
        Self {
            identity,
            captcha,
            priority,
        }
    }

    /// Creates a dispatcher with the production adapters
    #[must_use]
    pub fn from_config(config: &VerifierConfig) -> Self {
        Self::new(
            Arc::new(DeveloperPortalVerifier::new(config.world_id.clone())),
            Arc::new(SiteVerifyClient::new(config.captcha.clone())),
            config.priority,
        )
    }

    /// Runs one verification attempt.
    ///
    /// Adapter errors never escape this method; every path returns a
    /// structured [`VerificationOutcome`].
    pub async fn dispatch(&self, request: &VerifyRequest) -> VerificationOutcome {
        if request.is_empty() {
            return VerificationOutcome::rejected(Method::None, NO_PAYLOAD_MESSAGE);
        }

        let (primary, fallback) = match self.priority {
            Priority::IdentityFirst => (Family::Identity, Family::Captcha),
            Priority::CaptchaFirst => (Family::Captcha, Family::Identity),
        };

        let mut primary_failure = None;
        if let Some(outcome) = self.attempt(primary, request).await {
            if outcome.success {
                return outcome;
            }
            primary_failure = Some(outcome);
        }

        // Primary absent or failed; the fallback's result is returned verbatim
        if let Some(outcome) = self.attempt(fallback, request).await {
            return outcome;
        }

        primary_failure.map_or_else(
            || VerificationOutcome::rejected(Method::None, NO_PAYLOAD_MESSAGE),
            |failure| {
                let message = format!(
                    "{}. Primary method ({}) failed.",
                    failure.message.trim_end_matches('.'),
                    failure.method.label()
                );
                VerificationOutcome::rejected(failure.method, message)
            },
        )
    }

    /// Invokes one family's adapter, or returns `None` when its payload is
    /// absent from the request.
    async fn attempt(&self, family: Family, request: &VerifyRequest) -> Option<VerificationOutcome> {
        match family {
            Family::Identity => {
                let proof = request.idkit_response.as_ref()?;

                Some(match self.identity.verify_proof(proof).await {
                    Ok(()) => {
                        tracing::info!(method = %Method::WorldId, "Verification accepted");
                        VerificationOutcome::verified(
                            Method::WorldId,
                            "World ID verification successful",
                        )
                    }
                    Err(err) => {
                        tracing::warn!(method = %Method::WorldId, "Verification failed: {err}");
                        VerificationOutcome::rejected(Method::WorldId, err.to_string())
                    }
                })
            }
            Family::Captcha => {
                let token = request.captcha_token.as_deref()?;
                let method = self.captcha.method();

                Some(match self.captcha.verify_token(token).await {
                    Ok(()) => {
                        tracing::info!(%method, "Verification accepted");
                        VerificationOutcome::verified(method, "Captcha verification successful")
                    }
                    Err(err) => {
                        tracing::warn!(%method, "Verification failed: {err}");
                        VerificationOutcome::rejected(method, err.to_string())
                    }
                })
            }
        }
    }
}
