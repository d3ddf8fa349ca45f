//! Declarative data-quality expectations.
//!
//! An [`Expectation`] is a single assertion about one column of a dataset. An
//! [`ExpectationSuite`] groups the expectations evaluated together in one
//! validation run. Both are plain data and can be loaded from YAML or TOML.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single data-quality assertion targeting one column.
///
/// # Example
///
/// ```rust
/// use etl_core::{Expectation, ExpectationKind};
///
/// let expectation = Expectation::in_range("idade", Some(0.0), Some(120.0));
/// assert_eq!(expectation.column, "idade");
/// assert!(matches!(expectation.kind, ExpectationKind::InRange { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    /// Target column
    pub column: String,

    /// Predicate and its parameters
    #[serde(flatten)]
    pub kind: ExpectationKind,
}

/// Predicate kinds an expectation can assert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpectationKind {
    /// The column is present in the dataset
    ColumnExists,

    /// No value in the column is missing
    NotNull,

    /// Every present value is representable as the given type
    OfType {
        /// Expected value type
        expected: ExpectedType,
    },

    /// Every present value lies within `[min, max]`; a missing bound is unbounded
    InRange {
        /// Lower bound (inclusive)
        min: Option<f64>,
        /// Upper bound (inclusive)
        max: Option<f64>,
    },
}

/// Value types an [`ExpectationKind::OfType`] check can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedType {
    /// Whole numbers
    #[serde(alias = "integer", alias = "int64")]
    Int,
    /// Any number
    #[serde(alias = "float64", alias = "double")]
    Float,
    /// Text
    #[serde(alias = "str", alias = "object")]
    String,
}

impl ExpectedType {
    /// Returns the type name.
    pub fn name(&self) -> &'static str {
        match self {
            ExpectedType::Int => "int",
            ExpectedType::Float => "float",
            ExpectedType::String => "string",
        }
    }
}

impl Expectation {
    /// Expects the column to exist.
    pub fn column_exists(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            kind: ExpectationKind::ColumnExists,
        }
    }

    /// Expects the column to contain no missing values.
    pub fn not_null(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            kind: ExpectationKind::NotNull,
        }
    }

    /// Expects every present value to be representable as `expected`.
    pub fn of_type(column: impl Into<String>, expected: ExpectedType) -> Self {
        Self {
            column: column.into(),
            kind: ExpectationKind::OfType { expected },
        }
    }

    /// Expects every present value to lie within `[min, max]`.
    pub fn in_range(column: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            column: column.into(),
            kind: ExpectationKind::InRange { min, max },
        }
    }

    /// Returns the canonical name of the expectation kind.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ExpectationKind::ColumnExists => "expect_column_to_exist",
            ExpectationKind::NotNull => "expect_column_values_to_not_be_null",
            ExpectationKind::OfType { .. } => "expect_column_values_to_be_of_type",
            ExpectationKind::InRange { .. } => "expect_column_values_to_be_between",
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExpectationKind::ColumnExists => write!(f, "{} exists", self.column),
            ExpectationKind::NotNull => write!(f, "{} not null", self.column),
            ExpectationKind::OfType { expected } => {
                write!(f, "{} of type {}", self.column, expected.name())
            }
            ExpectationKind::InRange { min, max } => write!(
                f,
                "{} in [{}, {}]",
                self.column,
                min.map_or("-inf".to_string(), |v| v.to_string()),
                max.map_or("+inf".to_string(), |v| v.to_string())
            ),
        }
    }
}

/// A named, ordered set of expectations evaluated together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationSuite {
    /// Suite name
    pub name: String,

    /// Expectations in evaluation order
    #[serde(default)]
    pub expectations: Vec<Expectation>,
}

impl ExpectationSuite {
    /// Creates an empty suite.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expectations: Vec::new(),
        }
    }

    /// Returns the number of expectations.
    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    /// Returns true if the suite has no expectations.
    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expectation_serialization() {
        let expectation = Expectation::in_range("salario", Some(0.0), None);
        let json = serde_json::to_value(&expectation).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "column": "salario",
                "kind": "in_range",
                "min": 0.0,
                "max": null
            })
        );
    }

    #[test]
    fn test_expectation_deserialization_with_aliases() {
        let json = r#"{"column": "id", "kind": "of_type", "expected": "integer"}"#;
        let expectation: Expectation = serde_json::from_str(json).unwrap();

        assert_eq!(expectation, Expectation::of_type("id", ExpectedType::Int));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Expectation::in_range("idade", Some(0.0), Some(120.0)).to_string(),
            "idade in [0, 120]"
        );
        assert_eq!(
            Expectation::in_range("salario", Some(0.0), None).to_string(),
            "salario in [0, +inf]"
        );
        assert_eq!(Expectation::not_null("nome").to_string(), "nome not null");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(
            Expectation::column_exists("id").kind_name(),
            "expect_column_to_exist"
        );
        assert_eq!(
            Expectation::of_type("id", ExpectedType::Int).kind_name(),
            "expect_column_values_to_be_of_type"
        );
    }
}
