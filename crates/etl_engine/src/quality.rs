//! Expectation evaluation.
//!
//! A failed expectation is data, not control flow: every expectation in a
//! suite is evaluated and reported, including those whose target column does
//! not exist.

use crate::stats::parse_numeric;
use etl_core::{
    Column, DataValue, Dataset, Expectation, ExpectationKind, ExpectationResult,
    ExpectationSuite, ExpectationSuiteBuilder, ExpectedType, ObservedValue, ValidationResult,
};
use tracing::{debug, warn};

/// Name of the built-in expectation suite.
pub const DEFAULT_SUITE_NAME: &str = "clean_data";

/// Returns the expectation suite applied to cleaned data by default.
pub fn default_suite() -> ExpectationSuite {
    ExpectationSuiteBuilder::new(DEFAULT_SUITE_NAME)
        .column_exists("id")
        .of_type("id", ExpectedType::Int)
        .not_null("id")
        .column_exists("idade")
        .in_range("idade", Some(0.0), Some(120.0))
        .column_exists("salario")
        .in_range("salario", Some(0.0), None)
        .column_exists("nome")
        .not_null("nome")
        .build()
}

/// Evaluates expectation suites against datasets.
pub struct QualityValidator;

impl QualityValidator {
    /// Creates a new quality validator.
    pub fn new() -> Self {
        Self
    }

    /// Evaluates every expectation of a suite, in order.
    pub fn validate(&self, dataset: &Dataset, suite: &ExpectationSuite) -> ValidationResult {
        let results: Vec<ExpectationResult> = suite
            .expectations
            .iter()
            .map(|expectation| self.evaluate(dataset, expectation))
            .collect();

        let result = ValidationResult::from_results(&suite.name, results);
        for failure in result.failures() {
            warn!(
                expectation = %failure.expectation,
                observed = %failure.observed,
                "Expectation failed"
            );
        }
        debug!(
            suite = %result.suite,
            successful = result.statistics.successful,
            evaluated = result.statistics.evaluated,
            "Validated dataset"
        );

        result
    }

    /// Evaluates a single expectation.
    pub fn evaluate(&self, dataset: &Dataset, expectation: &Expectation) -> ExpectationResult {
        let column = dataset.column(&expectation.column);

        let (success, observed) = match (&expectation.kind, column) {
            (ExpectationKind::ColumnExists, column) => {
                (column.is_some(), ObservedValue::Exists(column.is_some()))
            }
            (_, None) => (false, ObservedValue::ColumnNotFound),
            (ExpectationKind::NotNull, Some(column)) => {
                let nulls = column.null_count();
                (nulls == 0, ObservedValue::NullCount(nulls))
            }
            (ExpectationKind::OfType { expected }, Some(column)) => (
                column.present().all(|value| representable(value, *expected)),
                ObservedValue::TypeName(column.column_type().name().to_string()),
            ),
            (ExpectationKind::InRange { min, max }, Some(column)) => {
                check_range(column, *min, *max)
            }
        };

        ExpectationResult {
            expectation: expectation.clone(),
            success,
            observed,
        }
    }
}

impl Default for QualityValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a present value can be represented as the expected type.
fn representable(value: &DataValue, expected: ExpectedType) -> bool {
    match (expected, value) {
        (ExpectedType::Int, DataValue::Int(_)) => true,
        (ExpectedType::Int, DataValue::Float(f)) => f.is_finite() && f.fract() == 0.0,
        (ExpectedType::Float, DataValue::Int(_) | DataValue::Float(_)) => true,
        (ExpectedType::String, DataValue::String(_)) => true,
        _ => false,
    }
}

/// Checks bounds on every present value and observes the actual extremes.
///
/// Numeric text is read as a number; any other present value fails the
/// check. A column with no present values passes.
fn check_range(column: &Column, min: Option<f64>, max: Option<f64>) -> (bool, ObservedValue) {
    let mut success = true;
    let mut observed_min: Option<f64> = None;
    let mut observed_max: Option<f64> = None;

    for value in column.present() {
        let Some(v) = parse_numeric(value) else {
            success = false;
            continue;
        };
        if min.is_some_and(|lo| v < lo) || max.is_some_and(|hi| v > hi) {
            success = false;
        }
        observed_min = Some(observed_min.map_or(v, |m| m.min(v)));
        observed_max = Some(observed_max.map_or(v, |m| m.max(v)));
    }

    (
        success,
        ObservedValue::Range {
            min: observed_min,
            max: observed_max,
        },
    )
}
