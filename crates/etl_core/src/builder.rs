//! Builder pattern for datasets and expectation suites.
//!
//! This module provides fluent builders so tests and stages can assemble
//! datasets column by column and declare expectation suites inline.

use crate::{Column, Dataset, DatasetError, Expectation, ExpectationSuite, ExpectedType};

/// Builder for creating a `Dataset`.
///
/// # Example
///
/// ```rust
/// use etl_core::DatasetBuilder;
///
/// let dataset = DatasetBuilder::new()
///     .int64("id", [Some(1), Some(2)])
///     .string("nome", [Some("Ana"), None])
///     .build()
///     .unwrap();
///
/// assert_eq!(dataset.row_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    columns: Vec<Column>,
}

impl DatasetBuilder {
    /// Creates a new dataset builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a prebuilt column.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds an integer column.
    pub fn int64(self, name: impl Into<String>, values: impl IntoIterator<Item = Option<i64>>) -> Self {
        self.column(Column::int64(name, values))
    }

    /// Adds a float column.
    pub fn float64(self, name: impl Into<String>, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        self.column(Column::float64(name, values))
    }

    /// Adds a string column.
    pub fn string<S: Into<String>>(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        self.column(Column::string(name, values))
    }

    /// Builds the dataset.
    ///
    /// # Errors
    ///
    /// Fails if column names repeat or column lengths differ.
    pub fn build(self) -> Result<Dataset, DatasetError> {
        Dataset::new(self.columns)
    }
}

/// Builder for creating an `ExpectationSuite`.
///
/// # Example
///
/// ```rust
/// use etl_core::{ExpectationSuiteBuilder, ExpectedType};
///
/// let suite = ExpectationSuiteBuilder::new("clean_data")
///     .column_exists("id")
///     .of_type("id", ExpectedType::Int)
///     .in_range("idade", Some(0.0), Some(120.0))
///     .build();
///
/// assert_eq!(suite.len(), 3);
/// ```
#[derive(Debug)]
pub struct ExpectationSuiteBuilder {
    name: String,
    expectations: Vec<Expectation>,
}

impl ExpectationSuiteBuilder {
    /// Creates a new suite builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expectations: Vec::new(),
        }
    }

    /// Adds an arbitrary expectation.
    pub fn expectation(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    /// Expects a column to exist.
    pub fn column_exists(self, column: impl Into<String>) -> Self {
        self.expectation(Expectation::column_exists(column))
    }

    /// Expects a column to have no missing values.
    pub fn not_null(self, column: impl Into<String>) -> Self {
        self.expectation(Expectation::not_null(column))
    }

    /// Expects a column's values to be of a type.
    pub fn of_type(self, column: impl Into<String>, expected: ExpectedType) -> Self {
        self.expectation(Expectation::of_type(column, expected))
    }

    /// Expects a column's values to lie within bounds.
    pub fn in_range(self, column: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        self.expectation(Expectation::in_range(column, min, max))
    }

    /// Builds the suite.
    pub fn build(self) -> ExpectationSuite {
        ExpectationSuite {
            name: self.name,
            expectations: self.expectations,
        }
    }
}
