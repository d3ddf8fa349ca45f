use crate::{Result, Stage, Transformed};
use etl_core::{Dataset, StageKind};

/// Publishes the latest raw dataset under `raw-data/`, creating the bucket
/// first if needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadRawStage;

impl Stage for UploadRawStage {
    fn kind(&self) -> StageKind {
        StageKind::UploadRaw
    }

    fn provisions_bucket(&self) -> bool {
        true
    }

    fn transform(&self, _input: Option<Dataset>) -> Result<Transformed> {
        Ok(Transformed::unchanged())
    }
}
