//! The concrete pipeline stages, in execution order.

mod clean;
mod enrich;
mod generate;
mod mask;
mod observe;
mod upload_raw;
mod validate;

pub use clean::CleanStage;
pub use enrich::EnrichStage;
pub use generate::{sample_dataset, GenerateStage};
pub use mask::MaskStage;
pub use observe::ObserveStage;
pub use upload_raw::UploadRawStage;
pub use validate::ValidateStage;

use crate::{PipelineConfig, Result, Stage, StageError};
use etl_core::{Dataset, StageKind};

/// Builds the stage of a given kind from the configuration.
pub fn build(kind: StageKind, config: &PipelineConfig) -> Result<Box<dyn Stage>> {
    let stage: Box<dyn Stage> = match kind {
        StageKind::Generate => Box::new(GenerateStage::new()),
        StageKind::UploadRaw => Box::new(UploadRawStage),
        StageKind::Observe => Box::new(ObserveStage::new()),
        StageKind::Clean => Box::new(CleanStage::new(config.expectation_suite()?)),
        StageKind::Validate => Box::new(ValidateStage::new(config.expectation_suite()?)),
        StageKind::Enrich => Box::new(EnrichStage::new()),
        StageKind::Mask => Box::new(MaskStage::new()),
    };
    Ok(stage)
}

/// Unwraps the input dataset of a consuming stage.
fn require_input(kind: StageKind, input: Option<Dataset>) -> Result<Dataset> {
    input.ok_or_else(|| StageError::invalid_input(format!("stage '{kind}' needs an input dataset")))
}
