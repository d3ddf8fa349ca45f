//! # ETL Store
//!
//! Everything the pipeline does with files:
//!
//! - [`ArtifactLocator`] finds the artifact a stage consumes
//! - [`ArtifactStore`] persists the artifact a stage produces, together with
//!   its lineage sidecar
//! - [`BlobStore`] publishes persisted artifacts to object storage
//!
//! Stages never share memory; the working directory is their only channel.
//!
//! ## Example
//!
//! ```no_run
//! use etl_store::{ArtifactLocator, BlobStore, LocalBlobStore, StoreConfig, remote_key};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), etl_store::StoreError> {
//! let input = ArtifactLocator::new().latest(Path::new("arquivos"), ".csv")?;
//!
//! let store = LocalBlobStore::new(&StoreConfig::default());
//! store.ensure_bucket()?;
//! store.put(&input, &remote_key("raw-data", &input))?;
//! # Ok(())
//! # }
//! ```

mod artifact;
mod blob;
mod config;
mod locator;

pub use artifact::*;
pub use blob::*;
pub use config::*;
pub use locator::*;

use etl_core::StageKind;
use etl_parser::ParserError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating, persisting or publishing artifacts.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No artifact with the requested extension exists in the directory
    #[error("No '{extension}' artifact found in {}", .directory.display())]
    ArtifactNotFound {
        /// Directory that was searched
        directory: PathBuf,
        /// Required file name suffix
        extension: String,
    },

    /// The derived output path is already taken
    #[error("Artifact already exists: {}", .0.display())]
    ArtifactExists(PathBuf),

    /// The stage does not produce a local artifact
    #[error("Stage '{0}' does not persist artifacts")]
    NoArtifact(StageKind),

    /// The object could not be written to the bucket
    #[error("Failed to upload '{key}': {message}")]
    Upload {
        /// Remote key of the object
        key: String,
        /// Reason for the failure
        message: String,
    },

    /// The bucket does not exist or cannot be created
    #[error("Bucket '{bucket}' is unavailable: {message}")]
    BucketUnavailable {
        /// Bucket name
        bucket: String,
        /// Reason for the failure
        message: String,
    },

    /// A source id that cannot be used as part of a file name
    #[error("Invalid source id '{0}': must be a single file name component")]
    InvalidSourceId(String),

    /// Invalid store configuration
    #[error("Invalid store configuration: {0}")]
    ConfigurationError(String),

    /// The artifact could not be encoded or decoded
    #[error("Failed to encode artifact: {0}")]
    Parser(#[from] ParserError),

    /// A lineage record could not be encoded or decoded
    #[error("Invalid lineage record: {0}")]
    Lineage(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Creates a new upload error.
    pub fn upload(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upload {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a new bucket unavailable error.
    pub fn bucket_unavailable(bucket: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BucketUnavailable {
            bucket: bucket.into(),
            message: message.into(),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
