use thiserror::Error;

/// Failure raised by a source adapter (network, auth, or payload shape).
///
/// Never fatal: the aggregator absorbs it and the failing source simply
/// contributes zero records for that refresh cycle.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("payload parse error: {0}")]
    Parse(String),
}

impl RequestError {
    /// Short kind tag for logs and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::Http(_) => "http",
            RequestError::Status(_) => "status",
            RequestError::Parse(_) => "parse",
        }
    }
}
