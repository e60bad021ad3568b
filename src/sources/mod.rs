// src/sources/mod.rs
pub mod feed;
pub mod newsapi;
pub mod social;
pub mod types;

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

use crate::config::AppConfig;
use crate::sources::feed::NewsFeedSource;
use crate::sources::newsapi::NewsApiSource;
use crate::sources::social::SocialSearchSource;
use crate::sources::types::{TextRecord, TextSource};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "source_records_total",
            "Records fetched per source, after adapter-level filtering."
        );
        describe_counter!(
            "source_fetch_errors_total",
            "Source fetch/parse errors absorbed by the aggregator."
        );
    });
}

/// Strip URLs, collapse whitespace runs to single spaces, trim.
pub fn clean_text(raw: &str) -> String {
    static RE_URL: OnceCell<regex::Regex> = OnceCell::new();
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_url = RE_URL.get_or_init(|| regex::Regex::new(r"http\S+").unwrap());
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());

    let out = re_url.replace_all(raw, "");
    let out = re_ws.replace_all(&out, " ");
    out.trim().to_string()
}

/// OR-combined search query for one ticker: the bare symbol, "<symbol>
/// stock", and an earnings/guidance/rating clause to widen recall beyond
/// exact mentions.
pub fn ticker_query(ticker: &str) -> String {
    format!(
        "{t} OR {t} stock OR ({t} AND (earnings OR guidance OR upgrade OR downgrade OR results))",
        t = ticker
    )
}

/// Fans a ticker out to the enabled sources, merges in source-priority
/// order (social, feed, news API), and truncates to the requested budget.
///
/// Fail-soft: one source failing never blocks the others or aborts the
/// ticker's aggregation.
pub struct TextAggregator {
    social: Box<dyn TextSource>,
    feed: Box<dyn TextSource>,
    news: Box<dyn TextSource>,
}

impl TextAggregator {
    /// Production wiring from config; credentials stay optional.
    pub fn from_config(cfg: &AppConfig, http: reqwest::Client) -> Self {
        Self {
            social: Box::new(SocialSearchSource::new(
                cfg.twitter_bearer_token.clone(),
                cfg.lookback_minutes,
                http.clone(),
            )),
            feed: Box::new(NewsFeedSource::new(http.clone())),
            news: Box::new(NewsApiSource::new(
                cfg.newsapi_key.clone(),
                cfg.lookback_minutes,
                http,
            )),
        }
    }

    /// Test wiring with arbitrary source implementations.
    pub fn with_sources(
        social: Box<dyn TextSource>,
        feed: Box<dyn TextSource>,
        news: Box<dyn TextSource>,
    ) -> Self {
        Self { social, feed, news }
    }

    /// Gather up to `max_items` records for one ticker.
    ///
    /// Each invoked source receives half the budget; the combined list is
    /// truncated at the end, so pre-truncation volume can exceed
    /// `max_items` when several sources are enabled.
    pub async fn gather(
        &self,
        ticker: &str,
        use_social: bool,
        use_news: bool,
        max_items: usize,
    ) -> Vec<TextRecord> {
        ensure_metrics_described();

        let query = ticker_query(ticker);
        let per_source = max_items / 2;

        let mut out: Vec<TextRecord> = Vec::new();
        if use_social {
            Self::collect(self.social.as_ref(), &query, per_source, &mut out).await;
        }
        if use_news {
            Self::collect(self.feed.as_ref(), &query, per_source, &mut out).await;
            Self::collect(self.news.as_ref(), &query, per_source, &mut out).await;
        }

        out.truncate(max_items);
        out
    }

    async fn collect(
        src: &dyn TextSource,
        query: &str,
        max_items: usize,
        out: &mut Vec<TextRecord>,
    ) {
        match src.fetch(query, max_items).await {
            Ok(mut records) => {
                counter!("source_records_total", "source" => src.name())
                    .increment(records.len() as u64);
                out.append(&mut records);
            }
            Err(e) => {
                tracing::warn!(error = ?e, kind = e.kind(), source = src.name(), "source fetch failed");
                counter!("source_fetch_errors_total", "source" => src.name()).increment(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_strips_urls_and_collapses_ws() {
        let s = "AAPL beats estimates  https://t.co/abc123 \n\t more at http://example.com/x";
        assert_eq!(clean_text(s), "AAPL beats estimates more at");
    }

    #[test]
    fn clean_text_is_idempotent() {
        let raw = "  TSLA\tdown   5% http://news.site/a\nafter guidance  ";
        let once = clean_text(raw);
        assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn clean_text_empty_input_yields_empty() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("   \n\t "), "");
        assert_eq!(clean_text("https://only.a.link/x"), "");
    }

    #[test]
    fn ticker_query_or_combines_event_terms() {
        let q = ticker_query("AAPL");
        assert_eq!(
            q,
            "AAPL OR AAPL stock OR (AAPL AND (earnings OR guidance OR upgrade OR downgrade OR results))"
        );
    }
}
