//! # Mood Aggregator
//! Reduces per-text polarity scores into a ticker-level average and a
//! discrete market-mood label. Summaries are independent across tickers;
//! there is no cross-ticker normalization.

use serde::{Deserialize, Serialize};

use crate::score::ScoreRecord;

/// Mean polarity strictly above this is Bullish.
pub const BULLISH_THRESHOLD: f64 = 0.1;
/// Mean polarity strictly below this is Bearish.
pub const BEARISH_THRESHOLD: f64 = -0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodLabel {
    Bullish,
    Bearish,
    Neutral,
}

/// Per-ticker summary, recomputed every refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSummary {
    pub ticker: String,
    /// Arithmetic mean of per-text polarity.
    pub sentiment: f64,
    pub label: MoodLabel,
    pub n_texts: usize,
}

/// Empty scores are a defined default (the "no data" state), not an error.
pub fn summarize(ticker: &str, scores: &[ScoreRecord]) -> TickerSummary {
    if scores.is_empty() {
        return TickerSummary {
            ticker: ticker.to_string(),
            sentiment: 0.0,
            label: MoodLabel::Neutral,
            n_texts: 0,
        };
    }
    let sentiment = scores.iter().map(|s| s.polarity).sum::<f64>() / scores.len() as f64;
    TickerSummary {
        ticker: ticker.to_string(),
        sentiment,
        label: label_for(sentiment),
        n_texts: scores.len(),
    }
}

/// Symmetric dead-band; both boundaries are exclusive.
pub fn label_for(sentiment: f64) -> MoodLabel {
    if sentiment > BULLISH_THRESHOLD {
        MoodLabel::Bullish
    } else if sentiment < BEARISH_THRESHOLD {
        MoodLabel::Bearish
    } else {
        MoodLabel::Neutral
    }
}
