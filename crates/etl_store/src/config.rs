//! Configuration for the blob store.

use crate::{Result, StoreError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;

/// Default bucket name.
pub const DEFAULT_BUCKET: &str = "data-lake";

/// Default region.
pub const DEFAULT_REGION: &str = "us-east-2";

/// Default directory backing the local blob store.
pub const DEFAULT_ROOT: &str = ".lake";

static BUCKET_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$").expect("bucket name pattern is valid")
});

/// Where published artifacts go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Bucket name, following object storage naming rules
    pub bucket: String,

    /// Region the bucket lives in
    pub region: String,

    /// Local directory holding the buckets
    pub root: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            region: DEFAULT_REGION.to_string(),
            root: PathBuf::from(DEFAULT_ROOT),
        }
    }
}

impl StoreConfig {
    /// Creates a new builder for `StoreConfig`.
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !BUCKET_NAME.is_match(&self.bucket) || self.bucket.contains("..") {
            return Err(StoreError::ConfigurationError(format!(
                "invalid bucket name '{}': use 3-63 lowercase letters, digits, dots or hyphens",
                self.bucket
            )));
        }

        if self.region.trim().is_empty() {
            return Err(StoreError::ConfigurationError(
                "region cannot be empty".to_string(),
            ));
        }

        if self.root.as_os_str().is_empty() {
            return Err(StoreError::ConfigurationError(
                "root cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for `StoreConfig`.
#[derive(Debug, Clone, Default)]
pub struct StoreConfigBuilder {
    bucket: Option<String>,
    region: Option<String>,
    root: Option<PathBuf>,
}

impl StoreConfigBuilder {
    /// Sets the bucket name.
    pub fn bucket<S: Into<String>>(mut self, bucket: S) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Sets the region.
    pub fn region<S: Into<String>>(mut self, region: S) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the local root directory.
    pub fn root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Builds the `StoreConfig`, filling unset fields with defaults.
    ///
    /// Returns an error if the result does not validate.
    pub fn build(self) -> Result<StoreConfig> {
        let defaults = StoreConfig::default();
        let config = StoreConfig {
            bucket: self.bucket.unwrap_or(defaults.bucket),
            region: self.region.unwrap_or(defaults.region),
            root: self.root.unwrap_or(defaults.root),
        };

        config.validate()?;
        Ok(config)
    }
}
