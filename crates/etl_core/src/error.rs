//! Error types for the dataset model.
//!
//! A [`Dataset`](crate::Dataset) checks its structural contract once, at
//! construction. Every violation of that contract is reported through
//! [`DatasetError`], so consumers never have to re-check shape or typing.

use thiserror::Error;

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Structural violations detected while building or reshaping a dataset.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// Two columns share the same name
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A column does not have the same number of values as the others
    #[error("Column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        /// Column name
        column: String,
        /// Row count of the dataset
        expected: usize,
        /// Number of values in the column
        actual: usize,
    },

    /// A value does not fit the column's declared type
    #[error("Column '{column}' row {row}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Column name
        column: String,
        /// Row index of the offending value
        row: usize,
        /// Declared column type
        expected: String,
        /// Type of the offending value
        actual: String,
    },

    /// A column required by an operation is absent
    #[error("Column not found: {0}")]
    MissingColumn(String),

    /// Row mask passed to a filter has the wrong length
    #[error("Row mask has {actual} entries, dataset has {expected} rows")]
    MaskLength {
        /// Row count of the dataset
        expected: usize,
        /// Length of the mask
        actual: usize,
    },
}

impl DatasetError {
    /// Creates a new type mismatch error.
    pub fn type_mismatch(
        column: impl Into<String>,
        row: usize,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            row,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates a new missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn(column.into())
    }
}
