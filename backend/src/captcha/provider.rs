use common_types::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A supported CAPTCHA family.
///
/// The two providers differ only in endpoint URL and auxiliary response
/// fields; everything the adapter needs is carried here.
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
pub enum CaptchaProvider {
    /// Google reCAPTCHA v2/v3
    Recaptcha,
    /// hCaptcha
    Hcaptcha,
}

impl CaptchaProvider {
    /// The provider's fixed siteverify endpoint
    #[must_use]
    pub const fn siteverify_url(&self) -> &'static str {
        match self {
            Self::Recaptcha => "https://www.google.com/recaptcha/api/siteverify",
            Self::Hcaptcha => "https://api.hcaptcha.com/siteverify",
        }
    }

    /// The outcome method tag for this provider
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::Recaptcha => Method::Recaptcha,
            Self::Hcaptcha => Method::Hcaptcha,
        }
    }

    /// Environment variable holding the client-exposed site key
    #[must_use]
    pub const fn site_key_var(&self) -> &'static str {
        match self {
            Self::Recaptcha => "RECAPTCHA_SITE_KEY",
            Self::Hcaptcha => "HCAPTCHA_SITE_KEY",
        }
    }

    /// Environment variable holding the server-only shared secret
    #[must_use]
    pub const fn secret_key_var(&self) -> &'static str {
        match self {
            Self::Recaptcha => "RECAPTCHA_SECRET_KEY",
            Self::Hcaptcha => "HCAPTCHA_SECRET_KEY",
        }
    }

    /// The other supported provider
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::Recaptcha => Self::Hcaptcha,
            Self::Hcaptcha => Self::Recaptcha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_serialization() {
        let serialized = serde_json::to_string(&CaptchaProvider::Recaptcha).unwrap();
        assert_eq!(serialized, "\"recaptcha\"");

        let deserialized: CaptchaProvider = serde_json::from_str("\"hcaptcha\"").unwrap();
        assert_eq!(deserialized, CaptchaProvider::Hcaptcha);
    }

    #[test]
    fn test_provider_selector_parsing() {
        assert_eq!(
            "recaptcha".parse::<CaptchaProvider>().unwrap(),
            CaptchaProvider::Recaptcha
        );
        assert_eq!(
            "hcaptcha".parse::<CaptchaProvider>().unwrap(),
            CaptchaProvider::Hcaptcha
        );
        assert!("turnstile".parse::<CaptchaProvider>().is_err());
    }

    #[test]
    fn test_method_tags() {
        assert_eq!(CaptchaProvider::Recaptcha.method(), Method::Recaptcha);
        assert_eq!(CaptchaProvider::Hcaptcha.method(), Method::Hcaptcha);
    }
}
