//! CAPTCHA token verification.
//!
//! reCAPTCHA and hCaptcha share the same siteverify contract (form-encoded
//! `secret` + `response`, JSON `success` field), so a single adapter is
//! parameterized by [`CaptchaProvider`] rather than duplicated per provider.

pub mod error;
pub mod provider;
pub mod verifier;

pub use error::CaptchaError;
pub use provider::CaptchaProvider;
pub use verifier::{CaptchaVerifier, SiteVerifyClient};
