//! Runtime configuration, read once at startup and passed into constructors.
//!
//! Credentials are optional: an absent token disables the matching source
//! without error. The ticker universe resolves from `$TICKERS`, then a TOML
//! file, then a built-in default list.

use anyhow::{Context, Result};
use std::path::Path;
use std::str::FromStr;

/// Bounded timeout applied to every outbound network call.
pub const REQUEST_TIMEOUT_SECS: u64 = 20;

/// How far back sources are queried for recent items (minutes).
pub const DEFAULT_LOOKBACK_MINUTES: i64 = 60;

/// Default per-ticker text budget.
pub const DEFAULT_MAX_ITEMS: usize = 80;
/// Bounds for the per-ticker text budget (matches the adjustable UI range).
pub const MIN_MAX_ITEMS: usize = 20;
pub const MAX_MAX_ITEMS: usize = 200;

/// Default sentiment model identifier.
pub const DEFAULT_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";

const ENV_TICKERS_PATH: &str = "TICKERS_CONFIG_PATH";
const DEFAULT_TICKERS_PATH: &str = "config/tickers.toml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Twitter/X bearer token; `None` disables the social source.
    pub twitter_bearer_token: Option<String>,
    /// newsapi.org key; `None` disables the news-API source.
    pub newsapi_key: Option<String>,
    /// Inference API token; anonymous calls work but are rate-limited harder.
    pub hf_api_token: Option<String>,
    pub lookback_minutes: i64,
    pub max_items: usize,
    /// Classifier model identifier.
    pub model: String,
    pub tickers: Vec<String>,
}

impl AppConfig {
    /// Build from the environment (call after `dotenvy::dotenv()`).
    pub fn from_env() -> Self {
        Self {
            twitter_bearer_token: non_empty_var("TWITTER_BEARER_TOKEN"),
            newsapi_key: non_empty_var("NEWSAPI_KEY"),
            hf_api_token: non_empty_var("HF_API_TOKEN"),
            lookback_minutes: env_parse("SEARCH_WINDOW_MIN", DEFAULT_LOOKBACK_MINUTES),
            max_items: clamp_max_items(env_parse("MAX_ITEMS", DEFAULT_MAX_ITEMS)),
            model: non_empty_var("SENTIMENT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            tickers: load_tickers_default(),
        }
    }
}

/// Clamp a requested per-ticker budget to the supported range.
pub fn clamp_max_items(n: usize) -> usize {
    n.clamp(MIN_MAX_ITEMS, MAX_MAX_ITEMS)
}

/// Built-in ticker universe used when nothing else is configured.
pub fn default_tickers() -> Vec<String> {
    ["AAPL", "TSLA", "MSFT", "GOOGL", "AMZN", "INFY", "RELIANCE.NS"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Resolve the ticker universe:
/// 1) $TICKERS (comma-separated)
/// 2) $TICKERS_CONFIG_PATH
/// 3) config/tickers.toml
/// 4) built-in default
pub fn load_tickers_default() -> Vec<String> {
    if let Some(raw) = non_empty_var("TICKERS") {
        let list = clean_list(raw.split(',').map(String::from).collect());
        if !list.is_empty() {
            return list;
        }
    }
    if let Ok(p) = std::env::var(ENV_TICKERS_PATH) {
        if let Ok(list) = load_tickers_from(Path::new(&p)) {
            return list;
        }
    }
    let default_path = Path::new(DEFAULT_TICKERS_PATH);
    if default_path.exists() {
        if let Ok(list) = load_tickers_from(default_path) {
            return list;
        }
    }
    default_tickers()
}

/// Load the ticker universe from a TOML file (`tickers = ["AAPL", ...]`).
pub fn load_tickers_from(path: &Path) -> Result<Vec<String>> {
    #[derive(serde::Deserialize)]
    struct TickersFile {
        tickers: Vec<String>,
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading tickers from {}", path.display()))?;
    let parsed: TickersFile = toml::from_str(&content).context("parsing tickers toml")?;
    let list = clean_list(parsed.tickers);
    if list.is_empty() {
        anyhow::bail!("empty ticker list in {}", path.display());
    }
    Ok(list)
}

/// Trim, uppercase, drop empties, dedup while preserving order.
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for it in items {
        let t = it.trim().to_uppercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

fn non_empty_var(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_parse<T: FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}
