//! The verification state reconciler.
//!
//! UI components read the session's phase and re-render on change; the only
//! writers are a verification attempt starting, its outcome landing, and an
//! explicit reset. At most one attempt is in flight per session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use common_types::{Method, VerificationOutcome, VerifyRequest};

use crate::client::DispatchApi;
use crate::error::SessionError;
use crate::scripts::{ProviderScript, ScriptRegistry, ScriptState};

/// Default ceiling on one verification attempt. A hung gateway call resolves
/// as a failure instead of leaving the session verifying forever.
const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure message applied when the gateway does not answer in time
const TIMEOUT_MESSAGE: &str = "Verification timed out";

/// Handle to an externally rendered CAPTCHA widget.
///
/// The remote widget holds UI state the session does not own; resetting the
/// session must also reset the widget through its own API.
pub trait WidgetHandle: Send {
    /// Resets the rendered widget to its unchecked state
    fn reset(&self);
}

/// Verification phase of a widget session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VerificationPhase {
    /// No attempt running; a new one may start
    #[default]
    Idle,
    /// An attempt is in flight; new attempts are rejected
    Verifying,
    /// The gateway accepted an attempt
    Verified {
        /// The verification family that succeeded
        method: Method,
    },
    /// The last attempt failed
    Failed {
        /// Failure detail for the UI
        error: String,
    },
}

struct SessionInner {
    phase: VerificationPhase,
    captcha_widget: Option<Box<dyn WidgetHandle>>,
    scripts: ScriptRegistry,
}

/// Client-side verification session.
///
/// Cheap to share across UI event handlers; all methods take `&self`.
pub struct VerificationSession {
    api: Arc<dyn DispatchApi>,
    timeout: Duration,
    inner: Mutex<SessionInner>,
}

impl VerificationSession {
    /// Creates a session over the given gateway client with the default
    /// attempt timeout
    #[must_use]
    pub fn new(api: Arc<dyn DispatchApi>) -> Self {
        Self::with_timeout(api, DEFAULT_VERIFY_TIMEOUT)
    }

    /// Creates a session with a caller-supplied attempt timeout
    #[must_use]
    pub fn with_timeout(api: Arc<dyn DispatchApi>, timeout: Duration) -> Self {
        Self {
            api,
            timeout,
            inner: Mutex::new(SessionInner {
                phase: VerificationPhase::default(),
                captcha_widget: None,
                scripts: ScriptRegistry::default(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current phase of the session
    #[must_use]
    pub fn phase(&self) -> VerificationPhase {
        self.lock().phase.clone()
    }

    /// Whether the session holds a successful verification
    #[must_use]
    pub fn is_verified(&self) -> bool {
        matches!(self.lock().phase, VerificationPhase::Verified { .. })
    }

    /// Whether an attempt is currently in flight
    #[must_use]
    pub fn is_verifying(&self) -> bool {
        self.lock().phase == VerificationPhase::Verifying
    }

    /// The verification family that succeeded, when verified
    #[must_use]
    pub fn method(&self) -> Option<Method> {
        match self.lock().phase {
            VerificationPhase::Verified { method } => Some(method),
            _ => None,
        }
    }

    /// The last failure detail, when the last attempt failed
    #[must_use]
    pub fn error(&self) -> Option<String> {
        match &self.lock().phase {
            VerificationPhase::Failed { error } => Some(error.clone()),
            _ => None,
        }
    }

    /// Submits one verification attempt to the gateway.
    ///
    /// The outcome is applied to the session in a single state transition;
    /// no reader observes partially updated fields. A timeout or transport
    /// fault resolves the attempt as a failure and releases the in-flight
    /// guard.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AttemptInFlight`] when called while a previous
    /// attempt has not resolved yet.
    pub async fn verify(
        &self,
        request: VerifyRequest,
    ) -> Result<VerificationOutcome, SessionError> {
        {
            let mut inner = self.lock();
            if inner.phase == VerificationPhase::Verifying {
                return Err(SessionError::AttemptInFlight);
            }
            inner.phase = VerificationPhase::Verifying;
        }

        let outcome = match tokio::time::timeout(self.timeout, self.api.verify(&request)).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                tracing::warn!("Verification attempt failed to reach the gateway: {err}");
                VerificationOutcome::rejected(Method::None, err.to_string())
            }
            Err(_) => {
                tracing::warn!("Verification attempt timed out after {:?}", self.timeout);
                VerificationOutcome::rejected(Method::None, TIMEOUT_MESSAGE)
            }
        };

        {
            let mut inner = self.lock();
            // A reset while the attempt was in flight wins over its outcome
            if inner.phase == VerificationPhase::Verifying {
                inner.phase = if outcome.success {
                    VerificationPhase::Verified {
                        method: outcome.method,
                    }
                } else {
                    VerificationPhase::Failed {
                        error: outcome.message.clone(),
                    }
                };
            } else {
                tracing::debug!("Discarding verification outcome after reset");
            }
        }

        Ok(outcome)
    }

    /// Returns the session to its initial phase.
    ///
    /// Also resets the rendered CAPTCHA widget through its handle, since the
    /// remote widget holds UI state of its own. Idempotent: a second
    /// consecutive call has no effect beyond the harmless widget reset.
    pub fn reset(&self) {
        let inner = &mut *self.lock();
        inner.phase = VerificationPhase::Idle;
        if let Some(widget) = &inner.captcha_widget {
            widget.reset();
        }
    }

    /// Attaches the handle of a freshly rendered CAPTCHA widget.
    ///
    /// Exactly one widget may be rendered per session container; a second
    /// registration without a reset of the container is refused.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::WidgetAlreadyRendered`] when a handle is
    /// already attached.
    pub fn register_captcha_widget(
        &self,
        handle: Box<dyn WidgetHandle>,
    ) -> Result<(), SessionError> {
        let mut inner = self.lock();
        if inner.captcha_widget.is_some() {
            return Err(SessionError::WidgetAlreadyRendered);
        }
        inner.captcha_widget = Some(handle);
        Ok(())
    }

    /// Current load state of a provider script
    #[must_use]
    pub fn script_state(&self, script: ProviderScript) -> ScriptState {
        self.lock().scripts.state(script)
    }

    /// Records a provider script's load event
    pub fn mark_script_loaded(&self, script: ProviderScript) {
        self.lock().scripts.mark_loaded(script);
    }

    /// Records a provider script's error event
    pub fn mark_script_failed(&self, script: ProviderScript) {
        self.lock().scripts.mark_failed(script);
    }

    /// Claims the single bounded retry for a failed provider script
    pub fn begin_script_retry(&self, script: ProviderScript) -> bool {
        self.lock().scripts.begin_retry(script)
    }
}
