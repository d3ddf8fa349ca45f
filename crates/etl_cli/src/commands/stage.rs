use anyhow::{Context, Result};
use etl_core::StageKind;
use etl_stages::{Pipeline, StageError};
use etl_store::BlobStore;
use tracing::info;

use crate::output;

pub fn execute<S: BlobStore>(pipeline: &Pipeline<S>, kind: StageKind) -> Result<()> {
    info!("Running stage: {}", kind);

    let report = pipeline
        .run(kind)
        .map_err(|e| report_failure(kind, e))
        .with_context(|| format!("Stage '{kind}' failed"))?;

    output::print_stage_report(&report);
    if let Some(validation) = &report.validation {
        output::print_validation_result(validation);
    }

    Ok(())
}

/// Prints what is left behind by a failed stage and passes the error on.
pub fn report_failure(kind: StageKind, error: StageError) -> StageError {
    output::print_error(&format!("Stage '{kind}' did not complete"));
    if let Some(artifact) = error.local_artifact() {
        output::print_info(&format!(
            "Local artifact kept at {}",
            artifact.display()
        ));
    }
    error
}
