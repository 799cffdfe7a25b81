use thiserror::Error;

/// Errors surfaced to UI code driving a [`crate::VerificationSession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// `verify` was called while a previous attempt was still in flight
    #[error("A verification attempt is already in flight")]
    AttemptInFlight,

    /// A widget handle was registered for a container that already has one
    #[error("A captcha widget is already rendered in this container")]
    WidgetAlreadyRendered,
}
