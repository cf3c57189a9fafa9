pub mod analyzer;
pub mod extractor;
pub mod notifier;

#[cfg(test)]
pub(crate) mod fakes;

use std::path::PathBuf;

use thiserror::Error;

use crate::{config::ConfigError, store::StoreError};

pub use analyzer::{AnalysisSummary, Analyzer};
pub use extractor::{default_targets, ExtractionSummary, Extractor};
pub use notifier::{NotificationSummary, Notifier};

/// Reasons a stage stops before finishing its batch.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("no keywords loaded from {}", .0.display())]
    NoKeywords(PathBuf),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl StageError {
    /// Lifts a read failure, turning a missing file into `MissingInput`.
    pub(crate) fn from_input(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(path) => StageError::MissingInput(path),
            other => StageError::Store(other),
        }
    }
}
