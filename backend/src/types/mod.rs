mod config;
mod environment;
mod error;
mod extractors;

pub use config::{CaptchaConfig, ConfigError, VerifierConfig, WorldIdConfig};
pub use environment::Environment;
pub use error::AppError;
pub use extractors::ApiJson;
