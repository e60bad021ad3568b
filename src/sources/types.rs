// src/sources/types.rs
use std::collections::HashMap;

use crate::error::RequestError;

/// Which upstream produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Social,
    Rss,
    Newsapi,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Social => "social",
            SourceKind::Rss => "rss",
            SourceKind::Newsapi => "newsapi",
        }
    }
}

/// One text fragment, shaped identically no matter which source produced it.
/// Immutable once created; lives for a single refresh cycle.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextRecord {
    pub source: SourceKind,
    /// Cleaned text (URLs stripped, whitespace collapsed).
    pub text: String,
    /// RFC 3339, or empty when the upstream gave no usable timestamp.
    pub created_at: String,
    pub url: String,
    /// Engagement counters; social source only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<HashMap<String, u64>>,
}

#[async_trait::async_trait]
pub trait TextSource: Send + Sync {
    /// Fetch up to `max_items` records matching `query`.
    ///
    /// A source whose credential is absent returns `Ok(vec![])` without
    /// touching the network; actual request failures return `RequestError`.
    async fn fetch(&self, query: &str, max_items: usize) -> Result<Vec<TextRecord>, RequestError>;
    fn kind(&self) -> SourceKind;
    fn name(&self) -> &'static str;
}
