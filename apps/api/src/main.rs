mod config;
mod errors;
mod feedback;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::CohereClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AI Interview Coach API v{}", env!("CARGO_PKG_VERSION"));

    if config.cohere_api_key.is_empty() {
        warn!("COHERE_API_KEY is not set; /submit-answers will answer with fallback feedback");
    }

    // Initialize provider client (built once, shared by every request)
    let cohere = CohereClient::new(config.cohere_api_key.clone(), &config.cohere_base_url)?;
    info!(
        "Using Cohere for /submit-answers text feedback (model: {}, endpoint: {})",
        llm_client::MODEL,
        cohere.endpoint()
    );

    let state = AppState {
        provider: Arc::new(cohere),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Server running on port {}", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
