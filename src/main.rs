//! Stock Sentiment Analyzer — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.
//!
//! See `README.md` for quickstart and configuration.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stock_sentiment_analyzer::api::{self, AppState};
use stock_sentiment_analyzer::classify::hf_inference::HfInferenceClassifier;
use stock_sentiment_analyzer::config::{AppConfig, REQUEST_TIMEOUT_SECS};
use stock_sentiment_analyzer::engine::SnapshotEngine;
use stock_sentiment_analyzer::metrics::Metrics;
use stock_sentiment_analyzer::prices::YahooChartProvider;
use stock_sentiment_analyzer::sources::TextAggregator;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = Arc::new(AppConfig::from_env());
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent("stock-sentiment-analyzer/0.1")
        .build()?;

    let metrics = Metrics::init();

    let aggregator = TextAggregator::from_config(&config, http.clone());
    let classifier = Arc::new(HfInferenceClassifier::new(
        config.model.clone(),
        config.hf_api_token.clone(),
        http.clone(),
    ));
    let engine = Arc::new(SnapshotEngine::new(aggregator, classifier));
    let prices = Arc::new(YahooChartProvider::new(http));

    let state = AppState {
        config: config.clone(),
        engine,
        prices,
    };
    let router = api::create_router(state).merge(metrics.router());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, tickers = config.tickers.len(), model = %config.model, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
