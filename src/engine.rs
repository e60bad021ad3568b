//! # Snapshot Engine
//! One refresh cycle: gather texts per ticker, score them, normalize the
//! scores, summarize per ticker. Every run is an independent computation
//! over a window ending "now"; nothing is shared across refreshes.

use std::sync::Arc;

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::classify::SentimentClassifier;
use crate::mood::{self, TickerSummary};
use crate::score::{self, ScoreRecord};
use crate::sources::types::SourceKind;
use crate::sources::TextAggregator;

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("snapshot_refreshes_total", "Completed snapshot refresh cycles.");
        describe_counter!(
            "snapshot_classifier_errors_total",
            "Classifier failures degraded to empty ticker summaries."
        );
    });
}

/// One text with its canonical score, joined for the stream view.
#[derive(Debug, Clone, Serialize)]
pub struct StreamRow {
    pub ticker: String,
    pub source: SourceKind,
    pub text: String,
    pub url: String,
    pub created_at: String,
    #[serde(flatten)]
    pub score: ScoreRecord,
}

/// Point-in-time result of one refresh: per-ticker summaries (sorted by
/// sentiment, descending) plus the joined text+score stream.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MarketSnapshot {
    pub summaries: Vec<TickerSummary>,
    pub stream: Vec<StreamRow>,
}

pub struct SnapshotEngine {
    aggregator: TextAggregator,
    classifier: Arc<dyn SentimentClassifier>,
}

impl SnapshotEngine {
    pub fn new(aggregator: TextAggregator, classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self {
            aggregator,
            classifier,
        }
    }

    /// Run one refresh over `tickers`.
    ///
    /// Records and scores stay index-paired end to end. A classifier
    /// failure degrades only the affected ticker to the empty summary;
    /// the snapshot itself always completes.
    pub async fn refresh(
        &self,
        tickers: &[String],
        use_social: bool,
        use_news: bool,
        max_items: usize,
    ) -> MarketSnapshot {
        ensure_metrics_described();

        let mut snapshot = MarketSnapshot::default();
        for ticker in tickers {
            let records = self
                .aggregator
                .gather(ticker, use_social, use_news, max_items)
                .await;

            let texts: Vec<String> = records.iter().map(|r| r.text.clone()).collect();
            let scores = match self.classifier.classify(&texts).await {
                Ok(raw) => score::normalize_batch(&raw),
                Err(e) => {
                    tracing::warn!(error = ?e, ticker = %ticker, "classifier failed; ticker degraded to empty summary");
                    counter!("snapshot_classifier_errors_total").increment(1);
                    Vec::new()
                }
            };

            for (record, score) in records.iter().zip(scores.iter()) {
                snapshot.stream.push(StreamRow {
                    ticker: ticker.clone(),
                    source: record.source,
                    text: record.text.clone(),
                    url: record.url.clone(),
                    created_at: record.created_at.clone(),
                    score: *score,
                });
            }
            snapshot.summaries.push(mood::summarize(ticker, &scores));
        }

        snapshot.summaries.sort_by(|a, b| {
            b.sentiment
                .partial_cmp(&a.sentiment)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        counter!("snapshot_refreshes_total").increment(1);
        snapshot
    }
}
