use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use mistral_gateway::config::{self, GatewayConfig};
use mistral_gateway::error::GatewayError;
use mistral_gateway::gateway::Gateway;
use mistral_gateway::http::reqwest::default_dyn_transport;
use mistral_gateway::server;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        tracing::error!("gateway failed to start: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), GatewayError> {
    let config = GatewayConfig::from_env()?;
    let transport = default_dyn_transport()?;
    let provider = config::build_provider(&config, transport);
    if provider.is_none() {
        tracing::warn!("MISTRAL_API_KEY is not set; forwarding routes will answer 503");
    }

    let gateway = Arc::new(Gateway::new(
        provider,
        config.text_model.clone(),
        config.vision_model.clone(),
    ));
    let app = server::router(gateway, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|err| {
            GatewayError::transport(format!("failed to bind {}: {err}", config.bind_addr))
        })?;
    tracing::info!("listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| GatewayError::transport(err.to_string()))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install shutdown handler: {err}");
    }
}
