//! Schema coercion for raw datasets.
//!
//! Raw artifacts arrive with loosely typed columns: spelled-out numbers,
//! sentinel strings such as `unknown`, out-of-range values and gaps. The
//! [`SchemaCoercer`] turns them into typed columns by applying one
//! [`ColumnRule`] per column.
//!
//! Identifier rules run first and are the only step allowed to remove rows.
//! Every other rule preserves the row count by imputation.

use crate::stats::{mean, parse_numeric, round_to};
use crate::{EngineError, Result};
use etl_core::{Column, ColumnType, DataValue, Dataset};
use tracing::{debug, info};

/// Placeholder used for missing names.
pub const UNKNOWN_NAME: &str = "Unknown";

/// How a single column is normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRule {
    /// Parse as a number, drop rows that fail, truncate to an integer.
    Identifier,

    /// Parse as a number (failures become missing), clip to the bounds, fill
    /// missing values with the mean of the present clipped values, and
    /// optionally round.
    Numeric {
        /// Lower clipping bound
        lower: Option<f64>,
        /// Upper clipping bound
        upper: Option<f64>,
        /// Decimal places kept after imputation
        decimals: Option<u32>,
    },

    /// Replace missing values with a placeholder; other values are kept as text.
    Text {
        /// Replacement for missing values
        placeholder: String,
    },
}

/// Normalizes raw column values into typed columns.
///
/// # Example
///
/// ```rust
/// use etl_core::DatasetBuilder;
/// use etl_engine::SchemaCoercer;
///
/// let raw = DatasetBuilder::new()
///     .string("id", [Some("1"), Some("seis"), Some("3")])
///     .string("nome", [Some("Ana"), Some("Caio"), None])
///     .string("idade", [Some("-6"), Some("30"), Some("unknown")])
///     .float64("salario", [Some(50000.0), None, Some(70000.0)])
///     .build()
///     .unwrap();
///
/// let clean = SchemaCoercer::new().coerce(raw).unwrap();
/// assert_eq!(clean.row_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SchemaCoercer {
    rules: Vec<(String, ColumnRule)>,
}

impl SchemaCoercer {
    /// Creates a coercer with the rules for the pipeline's raw schema.
    pub fn new() -> Self {
        Self::with_rules(Vec::new())
            .rule("id", ColumnRule::Identifier)
            .rule(
                "idade",
                ColumnRule::Numeric {
                    lower: Some(0.0),
                    upper: Some(120.0),
                    decimals: Some(1),
                },
            )
            .rule(
                "salario",
                ColumnRule::Numeric {
                    lower: Some(0.0),
                    upper: None,
                    decimals: None,
                },
            )
            .rule(
                "nome",
                ColumnRule::Text {
                    placeholder: UNKNOWN_NAME.to_string(),
                },
            )
    }

    /// Creates a coercer from an explicit rule list.
    pub fn with_rules(rules: Vec<(String, ColumnRule)>) -> Self {
        Self { rules }
    }

    /// Adds a rule for a column.
    pub fn rule(mut self, column: impl Into<String>, rule: ColumnRule) -> Self {
        self.rules.push((column.into(), rule));
        self
    }

    /// Returns the configured rules in application order.
    pub fn rules(&self) -> &[(String, ColumnRule)] {
        &self.rules
    }

    /// Coerces a raw dataset.
    ///
    /// Columns without a rule pass through untouched and column order is
    /// preserved.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingColumn` if a column with a rule is absent.
    /// Unparseable values never fail the call.
    pub fn coerce(&self, dataset: Dataset) -> Result<Dataset> {
        if let Some((name, _)) = self
            .rules
            .iter()
            .find(|(name, _)| !dataset.contains_column(name))
        {
            return Err(EngineError::missing_column(name.as_str()));
        }

        let mut dataset = self.drop_invalid_identifiers(dataset)?;

        for (name, rule) in &self.rules {
            let column = dataset.require(name)?;
            let coerced = match rule {
                ColumnRule::Identifier => coerce_identifier(column),
                ColumnRule::Numeric {
                    lower,
                    upper,
                    decimals,
                } => coerce_numeric(column, *lower, *upper, *decimals),
                ColumnRule::Text { placeholder } => coerce_text(column, placeholder),
            };
            dataset = dataset.with_column(coerced)?;
        }

        Ok(dataset)
    }

    /// Removes rows whose identifiers do not parse as numbers.
    fn drop_invalid_identifiers(&self, dataset: Dataset) -> Result<Dataset> {
        let identifiers: Vec<&Column> = self
            .rules
            .iter()
            .filter(|(_, rule)| *rule == ColumnRule::Identifier)
            .filter_map(|(name, _)| dataset.column(name))
            .collect();

        if identifiers.is_empty() {
            return Ok(dataset);
        }

        let keep: Vec<bool> = (0..dataset.row_count())
            .map(|row| {
                identifiers
                    .iter()
                    .all(|column| column.get(row).and_then(parse_identifier).is_some())
            })
            .collect();

        let dropped = keep.iter().filter(|k| !**k).count();
        if dropped > 0 {
            info!(dropped, "Dropped rows with non-numeric identifiers");
        }

        Ok(dataset.filter_rows(&keep)?)
    }
}

impl Default for SchemaCoercer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses an identifier, truncating fractional values.
fn parse_identifier(value: &DataValue) -> Option<i64> {
    match value {
        DataValue::Int(i) => Some(*i),
        DataValue::String(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| parse_numeric(value).and_then(truncate)),
        other => other.as_float().and_then(truncate),
    }
}

fn truncate(value: f64) -> Option<i64> {
    value.is_finite().then(|| value.trunc() as i64)
}

fn coerce_identifier(column: &Column) -> Column {
    Column::int64(
        column.name(),
        column.values().iter().map(parse_identifier),
    )
}

fn coerce_numeric(
    column: &Column,
    lower: Option<f64>,
    upper: Option<f64>,
    decimals: Option<u32>,
) -> Column {
    let clipped: Vec<Option<f64>> = column
        .values()
        .iter()
        .map(|value| parse_numeric(value).map(|v| clip(v, lower, upper)))
        .collect();

    let present: Vec<f64> = clipped.iter().flatten().copied().collect();
    let fill = mean(&present);
    debug!(
        column = column.name(),
        missing = clipped.len() - present.len(),
        fill = ?fill,
        "Imputing numeric column"
    );

    Column::float64(
        column.name(),
        clipped.into_iter().map(|value| {
            value
                .or(fill)
                .map(|v| decimals.map_or(v, |d| round_to(v, d)))
        }),
    )
}

fn clip(value: f64, lower: Option<f64>, upper: Option<f64>) -> f64 {
    let value = lower.map_or(value, |lo| value.max(lo));
    upper.map_or(value, |hi| value.min(hi))
}

fn coerce_text(column: &Column, placeholder: &str) -> Column {
    Column::string(
        column.name(),
        column.values().iter().map(|value| match value {
            DataValue::String(s) => Some(s.clone()),
            value if value.is_null() => Some(placeholder.to_string()),
            other => Some(other.to_string()),
        }),
    )
}

impl ColumnRule {
    /// Column type produced by the rule.
    pub fn output_type(&self) -> ColumnType {
        match self {
            ColumnRule::Identifier => ColumnType::Int64,
            ColumnRule::Numeric { .. } => ColumnType::Float64,
            ColumnRule::Text { .. } => ColumnType::String,
        }
    }
}
