use super::require_input;
use crate::render::{JsonRenderer, Renderer};
use crate::{Result, Stage, Transformed};
use etl_core::{Dataset, StageKind};
use etl_engine::MetricsEngine;
use tracing::info;

/// Computes observability metrics and renders them as JSON.
pub struct ObserveStage {
    engine: MetricsEngine,
    renderer: JsonRenderer,
}

impl ObserveStage {
    /// Creates a new observability stage.
    pub fn new() -> Self {
        Self {
            engine: MetricsEngine::new(),
            renderer: JsonRenderer,
        }
    }
}

impl Default for ObserveStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for ObserveStage {
    fn kind(&self) -> StageKind {
        StageKind::Observe
    }

    fn transform(&self, input: Option<Dataset>) -> Result<Transformed> {
        let dataset = require_input(self.kind(), input)?;
        let report = self.engine.compute(&dataset)?;

        for (column, nulls) in report.null_counts.iter().filter(|(_, n)| **n > 0) {
            info!(column = %column, nulls, "Column has missing values");
        }

        Ok(Transformed::document(self.renderer.render(&report)?))
    }
}
