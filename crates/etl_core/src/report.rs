//! Report types produced by the metrics engine and the quality validator.

use crate::Expectation;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary statistics of a numeric column.
///
/// Null values are excluded from every statistic. When a column has no
/// present values, every field except `count` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitativeStats {
    /// Number of non-null values
    pub count: usize,
    /// Arithmetic mean
    pub mean: Option<f64>,
    /// Sample standard deviation (divisor n-1)
    pub std: Option<f64>,
    /// Smallest value
    pub min: Option<f64>,
    /// 25th percentile
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    /// Median
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    /// 75th percentile
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    /// Largest value
    pub max: Option<f64>,
}

/// Summary statistics of a categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalStats {
    /// Number of non-null values
    pub total: usize,
    /// Number of distinct non-null values
    pub distinct: usize,
    /// Most frequent value; ties go to the value seen first
    pub mode: Option<String>,
    /// Occurrences of the most frequent value
    pub mode_frequency: Option<usize>,
}

/// Observability metrics for a whole dataset.
///
/// Maps preserve the column order of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Total number of rows
    pub row_count: usize,
    /// Column names in order
    pub columns: Vec<String>,
    /// Missing values per column
    pub null_counts: IndexMap<String, usize>,
    /// Declared type name per column
    pub dtypes: IndexMap<String, String>,
    /// Statistics of numeric columns
    pub quantitative: IndexMap<String, QuantitativeStats>,
    /// Statistics of string columns
    pub categorical: IndexMap<String, CategoricalStats>,
}

/// The value observed while evaluating an expectation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "observed", content = "value", rename_all = "snake_case")]
pub enum ObservedValue {
    /// Whether the column was present
    Exists(bool),
    /// Number of missing values
    NullCount(usize),
    /// Type name inferred for the column
    TypeName(String),
    /// Actual minimum and maximum of the present values
    Range {
        /// Smallest present value
        min: Option<f64>,
        /// Largest present value
        max: Option<f64>,
    },
    /// The target column does not exist
    ColumnNotFound,
}

impl fmt::Display for ObservedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservedValue::Exists(true) => f.write_str("present"),
            ObservedValue::Exists(false) => f.write_str("absent"),
            ObservedValue::NullCount(n) => write!(f, "{n} null"),
            ObservedValue::TypeName(name) => f.write_str(name),
            ObservedValue::Range { min, max } => {
                let fmt_bound = |b: &Option<f64>| b.map_or("n/a".to_string(), |v| v.to_string());
                write!(f, "[{}, {}]", fmt_bound(min), fmt_bound(max))
            }
            ObservedValue::ColumnNotFound => f.write_str("column not found"),
        }
    }
}

/// Outcome of one expectation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationResult {
    /// The evaluated expectation
    pub expectation: Expectation,
    /// Whether it held
    pub success: bool,
    /// What was observed in the data
    pub observed: ObservedValue,
}

/// Counters over a validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationStatistics {
    /// Number of expectations evaluated
    pub evaluated: usize,
    /// Number that held
    pub successful: usize,
    /// Number that failed
    pub unsuccessful: usize,
    /// Share of successful expectations, in percent
    pub success_percent: Option<f64>,
}

/// Result of evaluating an expectation suite against a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Name of the suite that was evaluated
    pub suite: String,
    /// Logical AND of every individual result
    pub success: bool,
    /// One entry per expectation, in suite order
    pub results: Vec<ExpectationResult>,
    /// Aggregate counters
    pub statistics: ValidationStatistics,
}

impl ValidationResult {
    /// Builds a result from individual outcomes, computing success and counters.
    pub fn from_results(suite: impl Into<String>, results: Vec<ExpectationResult>) -> Self {
        let evaluated = results.len();
        let successful = results.iter().filter(|r| r.success).count();
        let success_percent =
            (evaluated > 0).then(|| successful as f64 / evaluated as f64 * 100.0);

        Self {
            suite: suite.into(),
            success: successful == evaluated,
            results,
            statistics: ValidationStatistics {
                evaluated,
                successful,
                unsuccessful: evaluated - successful,
                success_percent,
            },
        }
    }

    /// Iterates over the expectations that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ExpectationResult> {
        self.results.iter().filter(|r| !r.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_result_aggregates() {
        let result = ValidationResult::from_results(
            "suite",
            vec![
                ExpectationResult {
                    expectation: Expectation::column_exists("id"),
                    success: true,
                    observed: ObservedValue::Exists(true),
                },
                ExpectationResult {
                    expectation: Expectation::not_null("nome"),
                    success: false,
                    observed: ObservedValue::ColumnNotFound,
                },
            ],
        );

        assert!(!result.success);
        assert_eq!(result.statistics.evaluated, 2);
        assert_eq!(result.statistics.unsuccessful, 1);
        assert_eq!(result.statistics.success_percent, Some(50.0));
        assert_eq!(result.failures().count(), 1);
    }

    #[test]
    fn test_empty_result_succeeds() {
        let result = ValidationResult::from_results("empty", Vec::new());
        assert!(result.success);
        assert_eq!(result.statistics.success_percent, None);
    }

    #[test]
    fn test_observed_value_display() {
        assert_eq!(ObservedValue::ColumnNotFound.to_string(), "column not found");
        assert_eq!(
            ObservedValue::Range {
                min: Some(0.0),
                max: Some(40.0)
            }
            .to_string(),
            "[0, 40]"
        );
        assert_eq!(ObservedValue::NullCount(0).to_string(), "0 null");
    }

    #[test]
    fn test_quantitative_stats_field_names() {
        let stats = QuantitativeStats {
            count: 0,
            mean: None,
            std: None,
            min: None,
            p25: None,
            p50: None,
            p75: None,
            max: None,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("25%").is_some());
        assert!(json["mean"].is_null());
    }
}
