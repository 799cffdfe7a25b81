//! Client-side session management for the human verification widget.
//!
//! Owns the verification state machine exposed to UI components, the
//! dispatch API client used to submit payloads to the gateway, readiness
//! tracking for the externally hosted provider scripts, and the lifecycle of
//! the rendered CAPTCHA widget handle.

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]

pub mod client;
pub mod error;
pub mod scripts;
pub mod session;

pub use client::{DispatchApi, DispatchApiError, HttpDispatchClient};
pub use error::SessionError;
pub use scripts::{ProviderScript, ScriptState};
pub use session::{VerificationPhase, VerificationSession, WidgetHandle};
