// src/classify/hf_inference.rs
//! Hugging Face inference-API client for text-classification models.
//!
//! The hosted pipeline truncates long inputs itself (`truncation: true`),
//! so callers never pre-truncate.

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{describe_histogram, histogram};
use once_cell::sync::OnceCell;
use serde_json::json;

use crate::classify::SentimentClassifier;
use crate::score::{LabelScore, RawPrediction};

const INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co/models";

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_histogram!("classify_ms", "Classifier round-trip time in milliseconds.");
    });
}

pub struct HfInferenceClassifier {
    http: reqwest::Client,
    model: String,
    api_token: Option<String>,
}

impl HfInferenceClassifier {
    pub fn new(model: impl Into<String>, api_token: Option<String>, http: reqwest::Client) -> Self {
        Self {
            http,
            model: model.into(),
            api_token,
        }
    }

    fn endpoint(&self) -> String {
        format!("{INFERENCE_BASE_URL}/{}", self.model)
    }
}

#[async_trait]
impl SentimentClassifier for HfInferenceClassifier {
    async fn classify(&self, texts: &[String]) -> Result<Vec<RawPrediction>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        ensure_metrics_described();

        let body = json!({
            "inputs": texts,
            "parameters": { "truncation": true },
            "options": { "wait_for_model": true },
        });

        let t0 = std::time::Instant::now();
        let mut req = self.http.post(self.endpoint()).json(&body);
        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }
        let resp = req
            .send()
            .await
            .context("inference api send")?
            .error_for_status()
            .context("inference api non-2xx")?;

        // One list of {label, score} pairs per input text.
        let scored: Vec<Vec<LabelScore>> = resp.json().await.context("inference api decode")?;
        histogram!("classify_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

        Ok(scored.into_iter().map(RawPrediction::Distribution).collect())
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_input_short_circuits_without_network() {
        let c = HfInferenceClassifier::new("some/model", None, reqwest::Client::new());
        let out = c.classify(&[]).await.expect("empty batch is not an error");
        assert!(out.is_empty());
    }

    #[test]
    fn endpoint_embeds_the_model_id() {
        let c = HfInferenceClassifier::new(
            "cardiffnlp/twitter-roberta-base-sentiment-latest",
            None,
            reqwest::Client::new(),
        );
        assert_eq!(
            c.endpoint(),
            "https://api-inference.huggingface.co/models/cardiffnlp/twitter-roberta-base-sentiment-latest"
        );
    }
}
