mod config;
mod docs;
mod health;
mod verify;

use aide::axum::{
    routing::{get, post},
    ApiRouter,
};

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler())
        .api_route("/health", get(health::handler))
        .api_route("/config", get(config::handler))
        .api_route("/verify", post(verify::handler))
}
