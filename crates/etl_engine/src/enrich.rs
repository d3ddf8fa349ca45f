//! Derived columns.

use crate::stats::parse_numeric;
use crate::{EngineError, Result};
use etl_core::{Column, Dataset};
use std::fmt;

/// Salaries below this are [`SalaryBand::Low`].
pub const MEDIUM_FLOOR: f64 = 70_000.0;

/// Salaries at or above this are [`SalaryBand::High`].
pub const HIGH_FLOOR: f64 = 80_000.0;

/// Salary bands assigned by the [`Enricher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryBand {
    /// Missing, negative or non-numeric salary
    Unknown,
    /// Below 70 000
    Low,
    /// From 70 000 up to, but excluding, 80 000
    Medium,
    /// 80 000 and above
    High,
}

impl SalaryBand {
    /// Classifies a salary. Total over every input.
    pub fn classify(salary: Option<f64>) -> Self {
        match salary {
            Some(v) if v.is_nan() || v < 0.0 => SalaryBand::Unknown,
            Some(v) if v < MEDIUM_FLOOR => SalaryBand::Low,
            Some(v) if v < HIGH_FLOOR => SalaryBand::Medium,
            Some(_) => SalaryBand::High,
            None => SalaryBand::Unknown,
        }
    }

    /// Returns the band label.
    pub fn label(&self) -> &'static str {
        match self {
            SalaryBand::Unknown => "Unknown",
            SalaryBand::Low => "Low",
            SalaryBand::Medium => "Medium",
            SalaryBand::High => "High",
        }
    }
}

impl fmt::Display for SalaryBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Adds a salary band column derived row by row from the salary column.
///
/// Re-applying the enricher recomputes the band from the salary and replaces
/// the existing band column in place, so the operation is idempotent.
#[derive(Debug, Clone)]
pub struct Enricher {
    source: String,
    target: String,
}

impl Enricher {
    /// Creates an enricher reading `salario` and writing `faixa_salarial`.
    pub fn new() -> Self {
        Self::with_columns("salario", "faixa_salarial")
    }

    /// Creates an enricher for custom column names.
    pub fn with_columns(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Adds the band column.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingColumn` if the salary column is absent.
    pub fn enrich(&self, dataset: Dataset) -> Result<Dataset> {
        let source = dataset
            .column(&self.source)
            .ok_or_else(|| EngineError::missing_column(self.source.as_str()))?;

        let bands = Column::string(
            self.target.as_str(),
            source
                .values()
                .iter()
                .map(|value| Some(SalaryBand::classify(parse_numeric(value)).label())),
        );

        Ok(dataset.with_column(bands)?)
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new()
    }
}
