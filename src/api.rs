use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::config::{self, AppConfig};
use crate::engine::{MarketSnapshot, SnapshotEngine};
use crate::prices::{PriceProvider, PriceSample};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub engine: Arc<SnapshotEngine>,
    pub prices: Arc<dyn PriceProvider>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/snapshot", get(snapshot))
        .route("/api/prices", get(prices))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, serde::Deserialize)]
struct SnapshotParams {
    /// Comma-separated tickers; defaults to the configured universe.
    tickers: Option<String>,
    /// Social source toggle; off by default (needs a credential anyway).
    #[serde(default)]
    social: bool,
    /// News sources toggle (feed + news API).
    #[serde(default = "default_true")]
    news: bool,
    max_items: Option<usize>,
}

fn default_true() -> bool {
    true
}

fn split_tickers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// One pull-based refresh cycle; the response is the full point-in-time
/// snapshot (summaries + joined stream).
async fn snapshot(
    State(state): State<AppState>,
    Query(p): Query<SnapshotParams>,
) -> Json<MarketSnapshot> {
    let tickers = p
        .tickers
        .as_deref()
        .map(split_tickers)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| state.config.tickers.clone());
    let max_items = config::clamp_max_items(p.max_items.unwrap_or(state.config.max_items));

    Json(
        state
            .engine
            .refresh(&tickers, p.social, p.news, max_items)
            .await,
    )
}

#[derive(Debug, serde::Deserialize)]
struct PriceParams {
    tickers: Option<String>,
    range: Option<String>,
    interval: Option<String>,
}

async fn prices(
    State(state): State<AppState>,
    Query(p): Query<PriceParams>,
) -> Json<Vec<PriceSample>> {
    let tickers = p
        .tickers
        .as_deref()
        .map(split_tickers)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| state.config.tickers.clone());
    let range = p.range.unwrap_or_else(|| "1d".to_string());
    let interval = p.interval.unwrap_or_else(|| "1m".to_string());

    match state.prices.get_intraday(&tickers, &range, &interval).await {
        Ok(samples) => Json(samples),
        Err(e) => {
            // render as the empty "no data" state rather than a 5xx
            tracing::warn!(error = ?e, "price retrieval failed");
            Json(Vec::new())
        }
    }
}
