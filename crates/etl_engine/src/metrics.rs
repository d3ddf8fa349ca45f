//! Observability metrics.
//!
//! The [`MetricsEngine`] profiles an arbitrary dataset. Columns are split by
//! their declared type: numeric columns get a quantitative summary, string
//! columns a categorical one. Missing values are excluded from every
//! statistic and counted separately.

use crate::stats::{mean, quantile, sample_std};
use crate::{EngineError, Result};
use etl_core::{CategoricalStats, Column, Dataset, MetricsReport, QuantitativeStats};
use indexmap::IndexMap;
use tracing::debug;

/// Computes descriptive statistics over a dataset.
pub struct MetricsEngine;

impl MetricsEngine {
    /// Creates a new metrics engine.
    pub fn new() -> Self {
        Self
    }

    /// Computes the metrics report for a dataset.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` if the dataset has no rows or no
    /// columns. No partial report is produced.
    pub fn compute(&self, dataset: &Dataset) -> Result<MetricsReport> {
        if dataset.column_count() == 0 {
            return Err(EngineError::invalid_input("dataset has no columns"));
        }
        if dataset.row_count() == 0 {
            return Err(EngineError::invalid_input("dataset has no rows"));
        }

        let mut report = MetricsReport {
            row_count: dataset.row_count(),
            columns: dataset.column_names().into_iter().map(String::from).collect(),
            null_counts: IndexMap::new(),
            dtypes: IndexMap::new(),
            quantitative: IndexMap::new(),
            categorical: IndexMap::new(),
        };

        for column in dataset.columns() {
            let name = column.name().to_string();
            report.null_counts.insert(name.clone(), column.null_count());
            report
                .dtypes
                .insert(name.clone(), column.column_type().name().to_string());

            if column.column_type().is_numeric() {
                report.quantitative.insert(name, self.quantitative(column));
            } else {
                report.categorical.insert(name, self.categorical(column));
            }
        }

        debug!(
            rows = report.row_count,
            quantitative = report.quantitative.len(),
            categorical = report.categorical.len(),
            "Computed metrics"
        );

        Ok(report)
    }

    /// Summarizes a numeric column.
    fn quantitative(&self, column: &Column) -> QuantitativeStats {
        let mut values = column.numeric_values();
        values.sort_by(f64::total_cmp);

        QuantitativeStats {
            count: values.len(),
            mean: mean(&values),
            std: sample_std(&values),
            min: values.first().copied(),
            p25: quantile(&values, 0.25),
            p50: quantile(&values, 0.50),
            p75: quantile(&values, 0.75),
            max: values.last().copied(),
        }
    }

    /// Summarizes a string column.
    ///
    /// Ties for the most frequent value go to the one encountered first.
    fn categorical(&self, column: &Column) -> CategoricalStats {
        let mut frequencies: IndexMap<String, usize> = IndexMap::new();
        for value in column.present() {
            *frequencies.entry(value.to_string()).or_insert(0) += 1;
        }

        let mut mode: Option<(&String, usize)> = None;
        for (value, &count) in &frequencies {
            if mode.is_none_or(|(_, best)| count > best) {
                mode = Some((value, count));
            }
        }

        CategoricalStats {
            total: frequencies.values().sum(),
            distinct: frequencies.len(),
            mode: mode.map(|(value, _)| value.clone()),
            mode_frequency: mode.map(|(_, count)| count),
        }
    }
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new()
    }
}
