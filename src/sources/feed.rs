// src/sources/feed.rs
//! Google News RSS adapter: a search feed over the escaped query.
//! No credential required.

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use quick_xml::de::from_str;
use serde::Deserialize;
use time::{
    format_description::well_known::{Rfc2822, Rfc3339},
    OffsetDateTime, UtcOffset,
};

use crate::error::RequestError;
use crate::sources::clean_text;
use crate::sources::types::{SourceKind, TextRecord, TextSource};

const FEED_BASE_URL: &str = "https://news.google.com/rss/search";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

/// RFC 2822 feed date -> RFC 3339, or empty when unparseable.
fn rfc2822_to_rfc3339(ts: &str) -> String {
    OffsetDateTime::parse(ts, &Rfc2822)
        .ok()
        .and_then(|dt| dt.to_offset(UtcOffset::UTC).format(&Rfc3339).ok())
        .unwrap_or_default()
}

/// Feed summaries arrive as HTML fragments: decode entities and strip tags
/// before the URL/whitespace cleanup.
fn strip_markup(s: &str) -> String {
    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    let decoded = html_escape::decode_html_entities(s).to_string();
    re_tags.replace_all(&decoded, " ").to_string()
}

pub struct NewsFeedSource {
    client: reqwest::Client,
}

impl NewsFeedSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Search-feed URL for a query; parse_with_params handles the escaping.
    pub fn feed_url(query: &str) -> String {
        reqwest::Url::parse_with_params(
            FEED_BASE_URL,
            &[("q", query), ("hl", "en-IN"), ("gl", "IN"), ("ceid", "IN:en")],
        )
        .expect("static feed base url")
        .to_string()
    }

    /// Parse feed XML into records: first `max_items` items, title + summary
    /// concatenated before cleaning.
    pub fn parse_feed(xml: &str, max_items: usize) -> Result<Vec<TextRecord>, RequestError> {
        let rss: Rss = from_str(xml).map_err(|e| RequestError::Parse(e.to_string()))?;

        let mut out = Vec::with_capacity(rss.channel.item.len().min(max_items));
        for it in rss.channel.item.into_iter().take(max_items) {
            let raw = format!(
                "{} {}",
                it.title.as_deref().unwrap_or_default(),
                it.description.as_deref().unwrap_or_default()
            );
            out.push(TextRecord {
                source: SourceKind::Rss,
                text: clean_text(&strip_markup(&raw)),
                created_at: it
                    .pub_date
                    .as_deref()
                    .map(rfc2822_to_rfc3339)
                    .unwrap_or_default(),
                url: it.link.unwrap_or_default(),
                metrics: None,
            });
        }
        Ok(out)
    }
}

#[async_trait]
impl TextSource for NewsFeedSource {
    async fn fetch(&self, query: &str, max_items: usize) -> Result<Vec<TextRecord>, RequestError> {
        let resp = self.client.get(Self::feed_url(query)).send().await?;
        if !resp.status().is_success() {
            return Err(RequestError::Status(resp.status()));
        }
        let body = resp.text().await?;
        Self::parse_feed(&body, max_items)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Rss
    }

    fn name(&self) -> &'static str {
        "rss"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_url_escapes_query() {
        let url = NewsFeedSource::feed_url("AAPL OR AAPL stock");
        assert!(url.starts_with(FEED_BASE_URL));
        assert!(url.contains("q=AAPL+OR+AAPL+stock") || url.contains("q=AAPL%20OR%20AAPL%20stock"));
        assert!(url.contains("ceid=IN%3Aen") || url.contains("ceid=IN:en"));
    }

    #[test]
    fn rfc2822_dates_normalize_to_rfc3339() {
        assert_eq!(
            rfc2822_to_rfc3339("Tue, 05 Aug 2025 13:30:00 GMT"),
            "2025-08-05T13:30:00Z"
        );
        assert_eq!(rfc2822_to_rfc3339("not a date"), "");
    }

    #[test]
    fn markup_is_stripped_before_cleaning() {
        let s = "<a href=\"https://x.test/a\">AAPL rallies</a>&nbsp;after earnings";
        let text = clean_text(&strip_markup(s));
        assert_eq!(text, "AAPL rallies after earnings");
    }
}
