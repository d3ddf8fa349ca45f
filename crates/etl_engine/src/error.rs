//! Error types for engine operations.

use etl_core::DatasetError;
use thiserror::Error;

/// Errors that can occur while transforming or profiling a dataset.
///
/// Per-value parse failures are never reported here: they are converted to
/// missing values and imputed where a rule asks for it.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A column the operation depends on is absent
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),

    /// The dataset cannot be processed at all (e.g. it is empty)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reshaping the dataset broke its structural contract
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

impl EngineError {
    /// Creates a new missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn(column.into())
    }

    /// Creates a new invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
