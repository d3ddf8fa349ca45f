//! Running stages by kind, one at a time or as a whole chain.

use crate::stages;
use crate::{PipelineConfig, Result, Stage, StageReport, StageRunner};
use etl_core::StageKind;
use etl_store::{BlobStore, LocalBlobStore};
use tracing::info;

/// The configured pipeline.
pub struct Pipeline<S: BlobStore> {
    config: PipelineConfig,
    store: S,
}

impl Pipeline<LocalBlobStore> {
    /// Creates a pipeline publishing to the local blob store described by the
    /// configuration.
    pub fn local(config: PipelineConfig) -> Self {
        let store = LocalBlobStore::new(&config.store);
        Self::new(config, store)
    }
}

impl<S: BlobStore> Pipeline<S> {
    /// Creates a pipeline with an explicit blob store.
    pub fn new(config: PipelineConfig, store: S) -> Self {
        Self { config, store }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Returns the blob store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Builds the stage of a given kind.
    pub fn stage(&self, kind: StageKind) -> Result<Box<dyn Stage>> {
        stages::build(kind, &self.config)
    }

    /// Runs a single stage by kind.
    pub fn run(&self, kind: StageKind) -> Result<StageReport> {
        let stage = self.stage(kind)?;
        self.run_stage(stage.as_ref())
    }

    /// Runs a prebuilt stage.
    pub fn run_stage(&self, stage: &dyn Stage) -> Result<StageReport> {
        StageRunner::new(&self.config, &self.store).run(stage)
    }

    /// Runs every stage in order, stopping at the first failure.
    ///
    /// `on_report` is called as soon as each stage completes, so callers see
    /// progress before a later stage fails.
    pub fn run_all<F>(&self, mut on_report: F) -> Result<Vec<StageReport>>
    where
        F: FnMut(&StageReport),
    {
        let mut reports = Vec::with_capacity(StageKind::ALL.len());
        for kind in StageKind::ALL {
            let report = self.run(kind)?;
            on_report(&report);
            reports.push(report);
        }
        info!(stages = reports.len(), "Pipeline finished");
        Ok(reports)
    }
}
