mod config;
mod doc_intel;
mod errors;
mod llm_client;
mod routes;
mod signup;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::doc_intel::DocIntelClient;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Signup API v{}", env!("CARGO_PKG_VERSION"));

    // Collaborator construction is best-effort: an unconfigured (or
    // placeholder-keyed) collaborator leaves its handle unset and the
    // corresponding pipeline stage skipped for the life of the process.
    let llm = config.groq_api_key.clone().map(LlmClient::new);
    info!(
        "LLM client {} (model: {})",
        if llm.is_some() { "initialized" } else { "not configured" },
        llm_client::MODEL
    );

    let doc_intel = DocIntelClient::from_config(
        config.doc_intel_endpoint.as_deref(),
        config.doc_intel_key.as_deref(),
    );
    info!(
        "Document extraction client {}",
        if doc_intel.is_some() { "initialized" } else { "not configured" }
    );

    let state = AppState { llm, doc_intel };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
