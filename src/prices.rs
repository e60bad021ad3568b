//! Intraday price retrieval (external collaborator).
//!
//! Joined to sentiment summaries only by ticker key at the display
//! boundary; never merged into the text/score records.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One close observation for a ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub ticker: String,
    pub time: DateTime<Utc>,
    pub close: f64,
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Intraday candles for each ticker. A ticker with no data yields no
    /// samples; one ticker's failure never fails the batch.
    async fn get_intraday(
        &self,
        tickers: &[String],
        range: &str,
        interval: &str,
    ) -> Result<Vec<PriceSample>>;
}

// ---- Yahoo Finance v8 chart API ----

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

pub struct YahooChartProvider {
    base_url: String,
    client: reqwest::Client,
}

impl YahooChartProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            client,
        }
    }

    async fn fetch_one(&self, ticker: &str, range: &str, interval: &str) -> Result<Vec<PriceSample>> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval={}",
            self.base_url, ticker, range, interval
        );
        let resp: ChartResponse = self
            .client
            .get(&url)
            .send()
            .await
            .context("chart send")?
            .error_for_status()
            .context("chart non-2xx")?
            .json()
            .await
            .context("chart decode")?;

        let Some(result) = resp.chart.result.and_then(|v| v.into_iter().next()) else {
            // no data for this ticker (outside market hours, unsupported symbol)
            return Ok(Vec::new());
        };
        let Some(quote) = result.indicators.quote.into_iter().next() else {
            return Ok(Vec::new());
        };

        let mut out = Vec::new();
        for (ts, close) in result.timestamp.iter().zip(quote.close) {
            let Some(close) = close else {
                // gap in the candle series
                continue;
            };
            let Some(time) = Utc.timestamp_opt(*ts, 0).single() else {
                continue;
            };
            out.push(PriceSample {
                ticker: ticker.to_string(),
                time,
                close,
            });
        }
        Ok(out)
    }
}

#[async_trait]
impl PriceProvider for YahooChartProvider {
    async fn get_intraday(
        &self,
        tickers: &[String],
        range: &str,
        interval: &str,
    ) -> Result<Vec<PriceSample>> {
        let mut out = Vec::new();
        for t in tickers {
            match self.fetch_one(t, range, interval).await {
                Ok(mut samples) => out.append(&mut samples),
                Err(e) => tracing::warn!(error = ?e, ticker = %t, "price fetch failed"),
            }
        }
        out.sort_by(|a, b| a.ticker.cmp(&b.ticker).then(a.time.cmp(&b.time)));
        Ok(out)
    }
}
