use super::require_input;
use crate::{Result, Stage, Transformed};
use etl_core::{Dataset, StageKind};
use etl_engine::Masker;

/// Replaces the name column with its masked form.
#[derive(Default)]
pub struct MaskStage {
    masker: Masker,
}

impl MaskStage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stage for MaskStage {
    fn kind(&self) -> StageKind {
        StageKind::Mask
    }

    fn transform(&self, input: Option<Dataset>) -> Result<Transformed> {
        let dataset = require_input(self.kind(), input)?;
        Ok(Transformed::dataset(self.masker.mask(dataset)?))
    }
}
