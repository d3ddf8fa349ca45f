use super::require_input;
use crate::render::{HtmlRenderer, Renderer};
use crate::{Result, Stage, Transformed};
use etl_core::{Dataset, ExpectationSuite, StageKind};
use etl_engine::QualityValidator;
use tracing::{info, warn};

/// Validates the latest dataset and renders the outcome as an HTML report.
pub struct ValidateStage {
    validator: QualityValidator,
    suite: ExpectationSuite,
    renderer: HtmlRenderer,
}

impl ValidateStage {
    /// Creates a validation stage for a suite.
    pub fn new(suite: ExpectationSuite) -> Self {
        Self::with_renderer(suite, HtmlRenderer::new())
    }

    /// Creates a validation stage with a custom report renderer.
    pub fn with_renderer(suite: ExpectationSuite, renderer: HtmlRenderer) -> Self {
        Self {
            validator: QualityValidator::new(),
            suite,
            renderer,
        }
    }
}

impl Stage for ValidateStage {
    fn kind(&self) -> StageKind {
        StageKind::Validate
    }

    fn transform(&self, input: Option<Dataset>) -> Result<Transformed> {
        let dataset = require_input(self.kind(), input)?;
        let validation = self.validator.validate(&dataset, &self.suite);

        let stats = &validation.statistics;
        if validation.success {
            info!(evaluated = stats.evaluated, "All expectations met");
        } else {
            warn!(
                evaluated = stats.evaluated,
                failed = stats.unsuccessful,
                "Data quality problems found"
            );
        }

        let html = self.renderer.render(&validation)?;
        Ok(Transformed::document(html).with_validation(validation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::sample_dataset;
    use crate::Output;
    use etl_engine::default_suite;

    #[test]
    fn test_validate_raw_sample_reports_failures() {
        let transformed = ValidateStage::new(default_suite())
            .transform(Some(sample_dataset().unwrap()))
            .unwrap();

        let validation = transformed.validation.unwrap();
        assert!(!validation.success);

        let Output::Document(html) = transformed.output else {
            panic!("expected a document");
        };
        assert!(html.contains("status failure"));
        assert!(html.contains("expect_column_values_to_not_be_null"));
    }
}
