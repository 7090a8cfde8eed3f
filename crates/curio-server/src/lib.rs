//! curio-server
//!
//! HTTP front for curio-core: env configuration, logging, rate limiting
//! and the `/api/artifacts` routes.

pub mod config;
pub mod http;
pub mod logging;
pub mod server;

use anyhow::Result;

pub const SERVICE_NAME: &str = "curio-server";

pub async fn run(config: config::ServerConfig) -> Result<()> {
    logging::init(SERVICE_NAME);

    let state = http::AppState::from_config(&config)?;
    tracing::info!(
        users = config.users.len(),
        webhook = config.webhook.is_some(),
        rate_limit_max = config.rate_limit.max_requests,
        "state ready"
    );

    let router = http::router(state, SERVICE_NAME);
    server::serve(config.addr, router).await
}
