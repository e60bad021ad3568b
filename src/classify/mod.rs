// src/classify/mod.rs
//! External classifier boundary.
//!
//! The pretrained model is a black box behind `SentimentClassifier`; the
//! core only depends on the raw prediction shapes in `crate::score`.

pub mod hf_inference;

use anyhow::Result;

use crate::score::RawPrediction;

#[async_trait::async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Score a batch of texts: one raw prediction per input, same order.
    ///
    /// Empty input must return an empty batch without a remote call.
    async fn classify(&self, texts: &[String]) -> Result<Vec<RawPrediction>>;

    /// Model identifier for diagnostics.
    fn model_id(&self) -> &str;
}
