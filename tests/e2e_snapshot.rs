// tests/e2e_snapshot.rs
//
// Full pipeline smoke: mock sources -> stub classifier -> snapshot.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use stock_sentiment_analyzer::classify::SentimentClassifier;
use stock_sentiment_analyzer::engine::SnapshotEngine;
use stock_sentiment_analyzer::error::RequestError;
use stock_sentiment_analyzer::mood::MoodLabel;
use stock_sentiment_analyzer::score::{LabelScore, RawPrediction};
use stock_sentiment_analyzer::sources::types::{SourceKind, TextRecord, TextSource};
use stock_sentiment_analyzer::sources::TextAggregator;

struct HeadlineSource {
    kind: SourceKind,
    name: &'static str,
    headlines: Vec<&'static str>,
}

#[async_trait]
impl TextSource for HeadlineSource {
    async fn fetch(&self, _query: &str, max_items: usize) -> Result<Vec<TextRecord>, RequestError> {
        Ok(self
            .headlines
            .iter()
            .take(max_items)
            .map(|t| TextRecord {
                source: self.kind,
                text: t.to_string(),
                created_at: "2025-08-05T12:00:00Z".to_string(),
                url: "https://example.test/a".to_string(),
                metrics: None,
            })
            .collect())
    }
    fn kind(&self) -> SourceKind {
        self.kind
    }
    fn name(&self) -> &'static str {
        self.name
    }
}

/// Keyword-driven stand-in for the hosted model.
struct StubClassifier;

#[async_trait]
impl SentimentClassifier for StubClassifier {
    async fn classify(&self, texts: &[String]) -> Result<Vec<RawPrediction>> {
        Ok(texts
            .iter()
            .map(|t| {
                let (neg, neu, pos) = if t.contains("beats") {
                    (0.05, 0.15, 0.80)
                } else if t.contains("misses") {
                    (0.75, 0.20, 0.05)
                } else {
                    (0.10, 0.80, 0.10)
                };
                RawPrediction::Distribution(vec![
                    LabelScore { label: "negative".into(), score: neg },
                    LabelScore { label: "neutral".into(), score: neu },
                    LabelScore { label: "positive".into(), score: pos },
                ])
            })
            .collect())
    }
    fn model_id(&self) -> &str {
        "stub"
    }
}

struct BrokenClassifier;

#[async_trait]
impl SentimentClassifier for BrokenClassifier {
    async fn classify(&self, texts: &[String]) -> Result<Vec<RawPrediction>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        anyhow::bail!("model endpoint unavailable")
    }
    fn model_id(&self) -> &str {
        "broken"
    }
}

fn feed(headlines: Vec<&'static str>) -> Box<dyn TextSource> {
    Box::new(HeadlineSource {
        kind: SourceKind::Rss,
        name: "rss",
        headlines,
    })
}

fn silent(kind: SourceKind, name: &'static str) -> Box<dyn TextSource> {
    Box::new(HeadlineSource {
        kind,
        name,
        headlines: vec![],
    })
}

#[tokio::test]
async fn snapshot_pairs_records_with_scores_and_sorts_summaries() {
    let agg = TextAggregator::with_sources(
        silent(SourceKind::Social, "twitter"),
        feed(vec![
            "AAPL beats expectations again",
            "AAPL beats on services revenue",
        ]),
        silent(SourceKind::Newsapi, "newsapi"),
    );
    let engine = SnapshotEngine::new(agg, Arc::new(StubClassifier));

    let tickers = vec!["AAPL".to_string()];
    let snap = engine.refresh(&tickers, false, true, 40).await;

    assert_eq!(snap.summaries.len(), 1);
    let s = &snap.summaries[0];
    assert_eq!(s.ticker, "AAPL");
    assert_eq!(s.n_texts, 2);
    assert_eq!(s.label, MoodLabel::Bullish);
    assert!((s.sentiment - 0.75).abs() < 1e-9);

    assert_eq!(snap.stream.len(), 2, "one stream row per gathered record");
    for row in &snap.stream {
        assert_eq!(row.ticker, "AAPL");
        assert_eq!(row.source, SourceKind::Rss);
        assert_eq!(row.score.polarity, row.score.positive - row.score.negative);
    }
    // index pairing: rows appear in gather order
    assert!(snap.stream[0].text.contains("expectations"));
    assert!(snap.stream[1].text.contains("services"));
}

#[tokio::test]
async fn summaries_are_sorted_by_sentiment_descending() {
    // the same feed serves every ticker; differentiate via the stub's keywords
    let agg = TextAggregator::with_sources(
        silent(SourceKind::Social, "twitter"),
        feed(vec!["Quarterly update, nothing new"]),
        silent(SourceKind::Newsapi, "newsapi"),
    );
    let engine = SnapshotEngine::new(agg, Arc::new(StubClassifier));

    let tickers = vec!["AAPL".to_string(), "TSLA".to_string()];
    let snap = engine.refresh(&tickers, false, true, 40).await;

    assert_eq!(snap.summaries.len(), 2);
    for pair in snap.summaries.windows(2) {
        assert!(pair[0].sentiment >= pair[1].sentiment);
    }
}

#[tokio::test]
async fn classifier_failure_degrades_ticker_to_empty_summary() {
    let agg = TextAggregator::with_sources(
        silent(SourceKind::Social, "twitter"),
        feed(vec!["TSLA misses delivery estimates"]),
        silent(SourceKind::Newsapi, "newsapi"),
    );
    let engine = SnapshotEngine::new(agg, Arc::new(BrokenClassifier));

    let tickers = vec!["TSLA".to_string()];
    let snap = engine.refresh(&tickers, false, true, 40).await;

    assert_eq!(snap.summaries.len(), 1, "snapshot still completes");
    let s = &snap.summaries[0];
    assert_eq!(s.sentiment, 0.0);
    assert_eq!(s.label, MoodLabel::Neutral);
    assert_eq!(s.n_texts, 0);
    assert!(snap.stream.is_empty());
}

#[tokio::test]
async fn all_sources_empty_is_a_recognizable_no_data_state() {
    let agg = TextAggregator::with_sources(
        silent(SourceKind::Social, "twitter"),
        silent(SourceKind::Rss, "rss"),
        silent(SourceKind::Newsapi, "newsapi"),
    );
    let engine = SnapshotEngine::new(agg, Arc::new(StubClassifier));

    let tickers = vec!["GOOGL".to_string()];
    let snap = engine.refresh(&tickers, true, true, 40).await;

    assert_eq!(snap.summaries[0].n_texts, 0);
    assert_eq!(snap.summaries[0].label, MoodLabel::Neutral);
    assert!(snap.stream.is_empty());
}
