// src/sources/social.rs
//! Twitter/X v2 recent-search adapter.
//!
//! Without a bearer token the source is disabled and yields no records;
//! the pipeline keeps running on the remaining sources.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, SecondsFormat, Utc};
use serde::Deserialize;

use crate::error::RequestError;
use crate::sources::clean_text;
use crate::sources::types::{SourceKind, TextRecord, TextSource};

const RECENT_SEARCH_URL: &str = "https://api.twitter.com/2/tweets/search/recent";

/// Upstream hard cap on `max_results` per call.
const PAGE_CAP: usize = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Tweet>,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    id: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    public_metrics: Option<HashMap<String, u64>>,
}

pub struct SocialSearchSource {
    bearer_token: Option<String>,
    lookback_minutes: i64,
    client: reqwest::Client,
}

impl SocialSearchSource {
    pub fn new(bearer_token: Option<String>, lookback_minutes: i64, client: reqwest::Client) -> Self {
        Self {
            bearer_token,
            lookback_minutes,
            client,
        }
    }

    /// Map one API payload to records: clean text, drop empties, cap.
    pub fn records_from_json(body: &str, max_items: usize) -> Result<Vec<TextRecord>, RequestError> {
        let resp: SearchResponse =
            serde_json::from_str(body).map_err(|e| RequestError::Parse(e.to_string()))?;

        let mut out = Vec::new();
        for t in resp.data {
            let text = clean_text(&t.text);
            if text.is_empty() {
                // link-only or whitespace-only post
                continue;
            }
            out.push(TextRecord {
                source: SourceKind::Social,
                text,
                created_at: t.created_at.unwrap_or_default(),
                url: format!("https://twitter.com/i/web/status/{}", t.id),
                metrics: t.public_metrics,
            });
            if out.len() >= max_items {
                break;
            }
        }
        Ok(out)
    }

    fn window_start(&self) -> String {
        (Utc::now() - Duration::minutes(self.lookback_minutes))
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

#[async_trait]
impl TextSource for SocialSearchSource {
    async fn fetch(&self, query: &str, max_items: usize) -> Result<Vec<TextRecord>, RequestError> {
        let Some(token) = &self.bearer_token else {
            // disabled source, not an error
            return Ok(Vec::new());
        };

        let page = max_items.min(PAGE_CAP);
        let resp = self
            .client
            .get(RECENT_SEARCH_URL)
            .bearer_auth(token)
            .query(&[
                ("query", format!("{query} -is:retweet lang:en")),
                ("max_results", page.to_string()),
                ("tweet.fields", "created_at,lang,public_metrics".to_string()),
                ("start_time", self.window_start()),
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
        SourceKind::Social
    }

    fn name(&self) -> &'static str {
        "twitter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_token_yields_empty_without_network() {
        let src = SocialSearchSource::new(None, 60, reqwest::Client::new());
        let out = src.fetch("AAPL", 50).await.expect("disabled source is not an error");
        assert!(out.is_empty());
    }
}
