mod config;
mod email;
mod errors;
mod extraction;
mod fetch;
mod llm_client;
mod normalize;
mod pipeline;
mod portfolio;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::fetch::HttpFetcher;
use crate::llm_client::GroqClient;
use crate::portfolio::Portfolio;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cold Mail Generator v{}", env!("CARGO_PKG_VERSION"));

    // Load the portfolio table and build its similarity index once; it is
    // read-only for the rest of the process lifetime.
    let mut portfolio = Portfolio::from_csv(&config.portfolio_path)?;
    portfolio.load();
    if portfolio.is_empty() {
        tracing::warn!("Portfolio table is empty; generated emails will cite no links");
    }
    info!("Portfolio ready: {} entries", portfolio.len());

    // Initialize the completion client
    let model = GroqClient::new(config.groq_api_key.clone(), config.groq_model.clone());
    info!("Completion client initialized (model: {})", model.model());

    // Build app state
    let state = AppState {
        fetcher: Arc::new(HttpFetcher::new()),
        model: Arc::new(model),
        portfolio: Arc::new(portfolio),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
