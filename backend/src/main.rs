use std::sync::Arc;

use backend::dispatch::Dispatcher;
use backend::server;
use backend::types::{Environment, VerifierConfig};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // Configure logging format based on environment
    // Use JSON format for staging/production, regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    let config = VerifierConfig::from_env()?;
    config.validate();

    let dispatcher = Arc::new(Dispatcher::from_config(&config));

    server::start(environment, Arc::new(config), dispatcher).await
}
