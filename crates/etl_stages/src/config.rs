//! Pipeline configuration.
//!
//! Settings are resolved in three layers: built-in defaults, an optional
//! YAML/TOML/JSON file, then `ETL_*` environment variables. The resolved
//! value is passed explicitly to every stage.

use crate::{Result, StageError};
use etl_core::ExpectationSuite;
use etl_engine::default_suite;
use etl_parser::parse_file;
use etl_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default working directory for artifacts.
pub const DEFAULT_WORKING_DIR: &str = "arquivos";

/// Environment variable overriding the working directory.
pub const ENV_WORKING_DIR: &str = "ETL_WORKING_DIR";
/// Environment variable overriding the bucket name.
pub const ENV_BUCKET: &str = "ETL_BUCKET";
/// Environment variable overriding the bucket region.
pub const ENV_REGION: &str = "ETL_REGION";
/// Environment variable overriding the blob store root directory.
pub const ENV_STORE_ROOT: &str = "ETL_STORE_ROOT";
/// Environment variable pointing at an expectation suite file.
pub const ENV_EXPECTATIONS: &str = "ETL_EXPECTATIONS";

/// Configuration shared by every stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory stages read artifacts from and write artifacts to
    pub working_dir: PathBuf,

    /// Expectation suite file; the built-in suite is used when unset
    pub expectations: Option<PathBuf>,

    /// Blob store settings
    pub store: StoreConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from(DEFAULT_WORKING_DIR),
            expectations: None,
            store: StoreConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Creates a new builder for `PipelineConfig`.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Loads the configuration from an optional file and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Loads the configuration, reading overrides through `lookup`.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading pipeline configuration");
                parse_file(path).map_err(|e| {
                    StageError::config(format!("{}: {e}", path.display()))
                })?
            }
            None => Self::default(),
        };

        let config = config.with_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Applies `ETL_*` overrides; empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(dir) = get(ENV_WORKING_DIR) {
            self.working_dir = PathBuf::from(dir);
        }
        if let Some(bucket) = get(ENV_BUCKET) {
            self.store.bucket = bucket;
        }
        if let Some(region) = get(ENV_REGION) {
            self.store.region = region;
        }
        if let Some(root) = get(ENV_STORE_ROOT) {
            self.store.root = PathBuf::from(root);
        }
        if let Some(expectations) = get(ENV_EXPECTATIONS) {
            self.expectations = Some(PathBuf::from(expectations));
        }
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.working_dir.as_os_str().is_empty() {
            return Err(StageError::config("working_dir cannot be empty"));
        }
        self.store
            .validate()
            .map_err(|e| StageError::config(e.to_string()))
    }

    /// Returns the expectation suite to validate cleaned data with.
    pub fn expectation_suite(&self) -> Result<ExpectationSuite> {
        match &self.expectations {
            Some(path) => parse_file(path).map_err(|e| {
                StageError::config(format!("expectation suite {}: {e}", path.display()))
            }),
            None => Ok(default_suite()),
        }
    }
}

/// Builder for `PipelineConfig`.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfigBuilder {
    working_dir: Option<PathBuf>,
    expectations: Option<PathBuf>,
    store: Option<StoreConfig>,
}

impl PipelineConfigBuilder {
    /// Sets the working directory.
    pub fn working_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Sets the expectation suite file.
    pub fn expectations<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.expectations = Some(path.into());
        self
    }

    /// Sets the blob store configuration.
    pub fn store(mut self, store: StoreConfig) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the `PipelineConfig`, filling unset fields with defaults.
    pub fn build(self) -> Result<PipelineConfig> {
        let defaults = PipelineConfig::default();
        let config = PipelineConfig {
            working_dir: self.working_dir.unwrap_or(defaults.working_dir),
            expectations: self.expectations.or(defaults.expectations),
            store: self.store.unwrap_or(defaults.store),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::fs;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::load_with(None, env(&[])).unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.working_dir, PathBuf::from("arquivos"));
        assert_eq!(config.store.bucket, "data-lake");
    }

    #[test]
    fn test_environment_overrides() {
        let config = PipelineConfig::load_with(
            None,
            env(&[
                (ENV_WORKING_DIR, "/tmp/work"),
                (ENV_BUCKET, "other-bucket"),
                (ENV_REGION, "eu-west-1"),
                (ENV_STORE_ROOT, "/tmp/lake"),
                (ENV_EXPECTATIONS, "suite.yml"),
            ]),
        )
        .unwrap();

        assert_eq!(config.working_dir, PathBuf::from("/tmp/work"));
        assert_eq!(config.store.bucket, "other-bucket");
        assert_eq!(config.store.region, "eu-west-1");
        assert_eq!(config.store.root, PathBuf::from("/tmp/lake"));
        assert_eq!(config.expectations, Some(PathBuf::from("suite.yml")));
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let config = PipelineConfig::load_with(None, env(&[(ENV_BUCKET, " ")])).unwrap();
        assert_eq!(config.store.bucket, "data-lake");
    }

    #[test]
    fn test_file_then_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.yml");
        fs::write(
            &path,
            "working_dir: data\nstore:\n  bucket: file-bucket\n  region: sa-east-1\n",
        )
        .unwrap();

        let config =
            PipelineConfig::load_with(Some(&path), env(&[(ENV_REGION, "us-west-2")])).unwrap();

        assert_eq!(config.working_dir, PathBuf::from("data"));
        assert_eq!(config.store.bucket, "file-bucket");
        assert_eq!(config.store.region, "us-west-2");
        assert_eq!(config.store.root, PathBuf::from(".lake"));
    }

    #[test]
    fn test_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.toml");
        fs::write(&path, "working_dir = \"data\"\n\n[store]\nbucket = \"toml-bucket\"\n").unwrap();

        let config = PipelineConfig::load_with(Some(&path), env(&[])).unwrap();
        assert_eq!(config.store.bucket, "toml-bucket");
    }

    #[test]
    fn test_invalid_bucket_is_a_config_error() {
        let result = PipelineConfig::load_with(None, env(&[(ENV_BUCKET, "Bad_Bucket")]));
        assert!(matches!(result, Err(StageError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let result = PipelineConfig::load_with(Some(Path::new("/nonexistent/etl.yml")), env(&[]));
        assert!(matches!(result, Err(StageError::Config(_))));
    }

    #[test]
    fn test_expectation_suite_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suite.yml");
        fs::write(
            &path,
            "name: custom\nexpectations:\n  - column: id\n    kind: not_null\n",
        )
        .unwrap();

        let config = PipelineConfig::builder().expectations(&path).build().unwrap();
        let suite = config.expectation_suite().unwrap();
        assert_eq!(suite.name, "custom");
        assert_eq!(suite.len(), 1);

        let builtin = PipelineConfig::default().expectation_suite().unwrap();
        assert_eq!(builtin.len(), 9);
    }
}
