use super::require_input;
use crate::{Result, Stage, Transformed};
use etl_core::{Dataset, StageKind};
use etl_engine::Enricher;

/// Adds the salary band column.
#[derive(Default)]
pub struct EnrichStage {
    enricher: Enricher,
}

impl EnrichStage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stage for EnrichStage {
    fn kind(&self) -> StageKind {
        StageKind::Enrich
    }

    fn transform(&self, input: Option<Dataset>) -> Result<Transformed> {
        let dataset = require_input(self.kind(), input)?;
        Ok(Transformed::dataset(self.enricher.enrich(dataset)?))
    }
}
