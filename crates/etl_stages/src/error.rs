//! Error types for stage execution.

use etl_engine::EngineError;
use etl_parser::ParserError;
use etl_store::StoreError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that end a stage run.
///
/// Every step of a stage is terminal on failure. Only [`StageError::Publish`]
/// happens after a local artifact was written; use
/// [`StageError::local_artifact`] to tell the two situations apart.
#[derive(Error, Debug)]
pub enum StageError {
    /// No input artifact could be located
    #[error("Input artifact not found: {0}")]
    NotFound(String),

    /// The input artifact is empty or malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The stage transformation failed
    #[error("Transform failed: {0}")]
    Transform(#[from] EngineError),

    /// A report could not be rendered
    #[error("Failed to render report: {0}")]
    Render(String),

    /// The output artifact could not be written
    #[error("Failed to persist artifact: {0}")]
    Persist(#[source] StoreError),

    /// The artifact was written locally but publishing it failed
    #[error("Artifact {} was written but could not be published: {source}", .artifact.display())]
    Publish {
        /// Local artifact left in place
        artifact: PathBuf,
        /// Store failure
        #[source]
        source: StoreError,
    },

    /// Invalid pipeline configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl StageError {
    /// Returns the local artifact that was produced before the failure, if any.
    pub fn local_artifact(&self) -> Option<&Path> {
        match self {
            StageError::Publish { artifact, .. } => Some(artifact.as_path()),
            _ => None,
        }
    }

    /// Creates a new invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a new render error.
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    /// Creates a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Classifies a failure to locate the input artifact.
    pub(crate) fn locate(error: StoreError) -> Self {
        match error {
            StoreError::ArtifactNotFound { .. } => Self::NotFound(error.to_string()),
            other => Self::InvalidInput(other.to_string()),
        }
    }

    /// Classifies a failure to load the input artifact.
    pub(crate) fn load(path: &Path, error: ParserError) -> Self {
        Self::InvalidInput(format!("{}: {error}", path.display()))
    }
}

/// Result type for stage operations.
pub type Result<T> = std::result::Result<T, StageError>;
