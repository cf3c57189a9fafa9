mod client;
pub mod inference;

use async_trait::async_trait;
use thiserror::Error;

pub use client::GeminiClient;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("model response {0:?} is not a number")]
    NotANumber(String),
    #[error("model returned out-of-range score {0}")]
    OutOfRange(i64),
    #[error("model response contained no text")]
    EmptyResponse,
    #[error("generation request failed: {0:#}")]
    Request(#[from] anyhow::Error),
}

/// Rates how relevant `text` is to `keyword`, 0 to 100 inclusive.
#[async_trait]
pub trait RelevanceScorer: Send + Sync {
    async fn score(&self, text: &str, keyword: &str) -> Result<u8, ScoreError>;
}
