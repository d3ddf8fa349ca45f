use anyhow::{Context, Result};
use etl_core::StageKind;
use etl_stages::Pipeline;
use etl_store::BlobStore;
use tracing::info;

use super::stage::report_failure;
use crate::output;

pub fn execute<S: BlobStore>(pipeline: &Pipeline<S>) -> Result<()> {
    info!("Running pipeline: {} stages", StageKind::ALL.len());

    let mut completed = 0;
    let result = pipeline.run_all(|report| {
        completed += 1;
        output::print_stage_report(report);
        if let Some(validation) = report.validation.as_ref().filter(|v| !v.success) {
            output::print_validation_result(validation);
        }
    });

    if let Err(e) = result {
        // the failing stage is the first one without a report
        return match StageKind::ALL.get(completed).copied() {
            Some(kind) => Err(report_failure(kind, e))
                .with_context(|| format!("Pipeline stopped at stage '{kind}'")),
            None => Err(e).context("Pipeline failed"),
        };
    }

    output::print_success("Pipeline finished");
    Ok(())
}
