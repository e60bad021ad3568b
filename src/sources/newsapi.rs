// src/sources/newsapi.rs
//! newsapi.org adapter (`/v2/everything`).
//!
//! Mirrors the social adapter's fail-open policy: no API key means the
//! source is disabled, not broken.

use async_trait::async_trait;
use chrono::{Duration, SecondsFormat, Utc};
use serde::Deserialize;

use crate::error::RequestError;
use crate::sources::clean_text;
use crate::sources::types::{SourceKind, TextRecord, TextSource};

const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, rename = "publishedAt")]
    published_at: Option<String>,
}

pub struct NewsApiSource {
    api_key: Option<String>,
    lookback_minutes: i64,
    client: reqwest::Client,
}

impl NewsApiSource {
    pub fn new(api_key: Option<String>, lookback_minutes: i64, client: reqwest::Client) -> Self {
        Self {
            api_key,
            lookback_minutes,
            client,
        }
    }

    /// Title + description concatenated before cleaning, capped at `max_items`.
    pub fn records_from_json(body: &str, max_items: usize) -> Result<Vec<TextRecord>, RequestError> {
        let resp: EverythingResponse =
            serde_json::from_str(body).map_err(|e| RequestError::Parse(e.to_string()))?;

        let mut out = Vec::new();
        for a in resp.articles.into_iter().take(max_items) {
            let raw = format!(
                "{} {}",
                a.title.as_deref().unwrap_or_default(),
                a.description.as_deref().unwrap_or_default()
            );
            out.push(TextRecord {
                source: SourceKind::Newsapi,
                text: clean_text(&raw),
                created_at: a.published_at.unwrap_or_default(),
                url: a.url.unwrap_or_default(),
                metrics: None,
            });
        }
        Ok(out)
    }
}

#[async_trait]
impl TextSource for NewsApiSource {
    async fn fetch(&self, query: &str, max_items: usize) -> Result<Vec<TextRecord>, RequestError> {
        let Some(key) = &self.api_key else {
            return Ok(Vec::new());
        };

        let from = (Utc::now() - Duration::minutes(self.lookback_minutes))
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let resp = self
            .client
            .get(EVERYTHING_URL)
            .query(&[
                ("q", query.to_string()),
                ("from", from),
                ("language", "en".to_string()),
                ("sortBy", "publishedAt".to_string()),
                ("pageSize", max_items.to_string()),
                ("apiKey", key.clone()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(RequestError::Status(resp.status()));
        }
        let body = resp.text().await?;
        Self::records_from_json(&body, max_items)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Newsapi
    }

    fn name(&self) -> &'static str {
        "newsapi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_key_yields_empty_without_network() {
        let src = NewsApiSource::new(None, 60, reqwest::Client::new());
        let out = src.fetch("TSLA", 40).await.expect("disabled source is not an error");
        assert!(out.is_empty());
    }
}
