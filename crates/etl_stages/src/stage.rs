//! The orchestration shape shared by every stage.
//!
//! A stage run walks `Locate -> Load -> Transform -> Persist -> Publish`.
//! Each step is terminal on failure and nothing is retried. Persist only runs
//! on a fully computed output, and a publish failure leaves the persisted
//! artifact in place.

use crate::{PipelineConfig, Result, StageError};
use chrono::Local;
use etl_core::{Dataset, Lineage, StageKind, ValidationResult};
use etl_parser::read_csv_file;
use etl_store::{
    derive_lineage, remote_key, ArtifactLocator, ArtifactStore, BlobStore, BucketStatus,
};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Extension of the dataset artifacts stages hand to each other.
pub const DATASET_EXTENSION: &str = ".csv";

/// Source id made of the local time, `YYYYMMDD_HHMMSS`.
pub fn timestamp_id() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// What a stage produced from its input.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// A dataset, persisted as CSV
    Dataset(Dataset),
    /// A rendered document, persisted as-is
    Document(String),
    /// Nothing new; the input artifact itself moves on to publishing
    Unchanged,
}

/// Result of the transform step.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    /// Output to persist
    pub output: Output,
    /// Validation performed while transforming, if any
    pub validation: Option<ValidationResult>,
}

impl Transformed {
    /// A dataset output.
    pub fn dataset(dataset: Dataset) -> Self {
        Self {
            output: Output::Dataset(dataset),
            validation: None,
        }
    }

    /// A document output.
    pub fn document(document: impl Into<String>) -> Self {
        Self {
            output: Output::Document(document.into()),
            validation: None,
        }
    }

    /// No new output.
    pub fn unchanged() -> Self {
        Self {
            output: Output::Unchanged,
            validation: None,
        }
    }

    /// Attaches a validation result.
    pub fn with_validation(mut self, validation: ValidationResult) -> Self {
        self.validation = Some(validation);
        self
    }
}

/// A single pipeline stage.
pub trait Stage {
    /// Which stage this is.
    fn kind(&self) -> StageKind;

    /// Whether the stage consumes the latest dataset artifact.
    fn consumes_input(&self) -> bool {
        true
    }

    /// Whether the stage creates the bucket before publishing.
    fn provisions_bucket(&self) -> bool {
        false
    }

    /// Source id for stages that start a lineage chain.
    fn origin_id(&self) -> String {
        timestamp_id()
    }

    /// Produces the stage output. `input` is `None` only for stages that do
    /// not consume an input.
    fn transform(&self, input: Option<Dataset>) -> Result<Transformed>;
}

/// Outcome of a successful stage run.
#[derive(Debug, Clone, PartialEq)]
pub struct StageReport {
    /// Stage that ran
    pub stage: StageKind,
    /// Artifact the stage consumed
    pub input: Option<PathBuf>,
    /// Artifact the stage persisted or forwarded
    pub artifact: Option<PathBuf>,
    /// Lineage source id of the artifact
    pub source_id: Option<String>,
    /// Row count of the persisted dataset
    pub rows: Option<usize>,
    /// Remote key the artifact was published under
    pub published: Option<String>,
    /// Bucket provisioning outcome
    pub bucket: Option<BucketStatus>,
    /// Validation performed by the stage
    pub validation: Option<ValidationResult>,
}

impl StageReport {
    fn new(stage: StageKind) -> Self {
        Self {
            stage,
            input: None,
            artifact: None,
            source_id: None,
            rows: None,
            published: None,
            bucket: None,
            validation: None,
        }
    }
}

/// Runs stages against a working directory and a blob store.
pub struct StageRunner<'a> {
    locator: ArtifactLocator,
    artifacts: ArtifactStore,
    store: &'a dyn BlobStore,
}

impl<'a> StageRunner<'a> {
    /// Creates a runner for a configuration and a blob store.
    pub fn new(config: &PipelineConfig, store: &'a dyn BlobStore) -> Self {
        Self {
            locator: ArtifactLocator::new(),
            artifacts: ArtifactStore::new(&config.working_dir),
            store,
        }
    }

    /// Runs one stage to completion.
    pub fn run(&self, stage: &dyn Stage) -> Result<StageReport> {
        let kind = stage.kind();
        let mut report = StageReport::new(kind);
        info!(stage = %kind, "Starting stage");

        let (input_path, dataset) = if stage.consumes_input() {
            let path = self.locate()?;
            let dataset = self.load(&path)?;
            (Some(path), Some(dataset))
        } else {
            (None, None)
        };
        report.input = input_path.clone();

        let transformed = stage.transform(dataset)?;
        report.validation = transformed.validation;

        let artifact = match transformed.output {
            Output::Unchanged => input_path.clone(),
            output => {
                let lineage = match &input_path {
                    Some(path) => derive_lineage(path, kind)
                        .map_err(|e| StageError::invalid_input(e.to_string()))?,
                    None => Lineage::origin(stage.origin_id(), kind),
                };
                report.source_id = Some(lineage.source_id.clone());
                Some(self.persist(&output, &lineage, input_path.as_deref(), &mut report)?)
            }
        };
        report.artifact = artifact.clone();

        if let (Some(artifact), Some(prefix)) = (artifact, kind.remote_prefix()) {
            if stage.provisions_bucket() {
                let status = self.store.ensure_bucket().map_err(|source| StageError::Publish {
                    artifact: artifact.clone(),
                    source,
                })?;
                report.bucket = Some(status);
            }
            report.published = Some(self.publish(&artifact, prefix)?);
        }

        info!(stage = %kind, "Stage finished");
        Ok(report)
    }

    fn locate(&self) -> Result<PathBuf> {
        let path = self
            .locator
            .latest(self.artifacts.directory(), DATASET_EXTENSION)
            .map_err(|e| {
                error!(error = %e, "Could not locate input artifact");
                StageError::locate(e)
            })?;
        info!(input = %path.display(), "Located input artifact");
        Ok(path)
    }

    fn load(&self, path: &Path) -> Result<Dataset> {
        let dataset = read_csv_file(path).map_err(|e| StageError::load(path, e))?;
        if dataset.is_empty() {
            return Err(StageError::invalid_input(format!(
                "{} holds no data",
                path.display()
            )));
        }
        info!(rows = dataset.row_count(), columns = dataset.column_count(), "Loaded dataset");
        Ok(dataset)
    }

    fn persist(
        &self,
        output: &Output,
        lineage: &Lineage,
        input: Option<&Path>,
        report: &mut StageReport,
    ) -> Result<PathBuf> {
        let persisted = match output {
            Output::Dataset(dataset) => {
                report.rows = Some(dataset.row_count());
                self.artifacts.persist_dataset(dataset, lineage, input)
            }
            Output::Document(document) => self.artifacts.persist_text(document, lineage, input),
            Output::Unchanged => {
                return input
                    .map(Path::to_path_buf)
                    .ok_or_else(|| StageError::invalid_input("no artifact to forward"));
            }
        };
        persisted.map_err(StageError::Persist)
    }

    fn publish(&self, artifact: &Path, prefix: &str) -> Result<String> {
        let key = remote_key(prefix, artifact);
        match self.store.put(artifact, &key) {
            Ok(()) => {
                info!(bucket = self.store.bucket(), key = %key, "Published artifact");
                Ok(key)
            }
            Err(source) => {
                warn!(artifact = %artifact.display(), error = %source, "Publish failed, local artifact kept");
                Err(StageError::Publish {
                    artifact: artifact.to_path_buf(),
                    source,
                })
            }
        }
    }
}
