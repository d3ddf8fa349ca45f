use super::require_input;
use crate::{Result, Stage, Transformed};
use etl_core::{Dataset, ExpectationSuite, StageKind};
use etl_engine::{QualityValidator, SchemaCoercer};
use tracing::{info, warn};

/// Coerces the raw dataset to the clean schema and checks it against the
/// expectation suite.
///
/// A failing suite does not fail the stage; the cleaned dataset is persisted
/// and the result is reported alongside it.
pub struct CleanStage {
    coercer: SchemaCoercer,
    validator: QualityValidator,
    suite: ExpectationSuite,
}

impl CleanStage {
    /// Creates a cleaning stage with the default coercion rules.
    pub fn new(suite: ExpectationSuite) -> Self {
        Self::with_coercer(SchemaCoercer::new(), suite)
    }

    /// Creates a cleaning stage with custom coercion rules.
    pub fn with_coercer(coercer: SchemaCoercer, suite: ExpectationSuite) -> Self {
        Self {
            coercer,
            validator: QualityValidator::new(),
            suite,
        }
    }
}

impl Stage for CleanStage {
    fn kind(&self) -> StageKind {
        StageKind::Clean
    }

    fn transform(&self, input: Option<Dataset>) -> Result<Transformed> {
        let dataset = require_input(self.kind(), input)?;
        let before = dataset.row_count();

        let cleaned = self.coercer.coerce(dataset)?;
        if cleaned.row_count() < before {
            info!(
                dropped = before - cleaned.row_count(),
                "Dropped rows without a usable identifier"
            );
        }

        let validation = self.validator.validate(&cleaned, &self.suite);
        if validation.success {
            info!(suite = %self.suite.name, "Cleaned data passed validation");
        } else {
            warn!(
                suite = %self.suite.name,
                failed = validation.statistics.unsuccessful,
                "Cleaned data did not pass validation"
            );
        }

        Ok(Transformed::dataset(cleaned).with_validation(validation))
    }
}
