// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod mood;
pub mod prices;
pub mod score;
pub mod sources;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::engine::{MarketSnapshot, SnapshotEngine};
pub use crate::error::RequestError;
pub use crate::mood::{MoodLabel, TickerSummary};
pub use crate::score::{RawPrediction, ScoreRecord};
pub use crate::sources::types::{SourceKind, TextRecord};
