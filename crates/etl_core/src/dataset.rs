//! Columnar dataset representation.
//!
//! A [`Dataset`] is an ordered sequence of named, typed [`Column`]s of equal
//! length. Row order is insertion order and every operation here preserves it.
//! The structural contract (unique names, equal lengths, values matching the
//! declared column type) is enforced when a column or dataset is built, so
//! downstream consumers can rely on it without re-validating.

use crate::{DatasetError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Null/missing value
    Null,
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

impl DataValue {
    /// Returns true if this value is null.
    ///
    /// A floating point `NaN` is treated as missing as well.
    pub fn is_null(&self) -> bool {
        match self {
            DataValue::Null => true,
            DataValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Int(_) => "int64",
            DataValue::Float(_) => "float64",
            DataValue::String(_) => "string",
        }
    }

    /// Attempts to get this value as a string.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DataValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float.
    ///
    /// Integers widen to floats; `NaN` is reported as absent.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DataValue::Float(f) if !f.is_nan() => Some(*f),
            DataValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Null => Ok(()),
            DataValue::Int(i) => write!(f, "{i}"),
            DataValue::Float(v) if v.is_nan() => Ok(()),
            // Keep a decimal point so float columns survive a text round trip.
            DataValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            DataValue::Float(v) => write!(f, "{v}"),
            DataValue::String(s) => f.write_str(s),
        }
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Int(i)
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DataValue::Null, Into::into)
    }
}

/// Declared type of a column.
///
/// Numeric types are reported as quantitative by the metrics engine, strings
/// as categorical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 64-bit signed integers
    Int64,
    /// 64-bit floats
    Float64,
    /// Free text / categories
    String,
}

impl ColumnType {
    /// Returns the type name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::String => "string",
        }
    }

    /// Returns true for integer and float columns.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Int64 | ColumnType::Float64)
    }

    /// Normalizes a value into this type, handing it back if it does not fit.
    ///
    /// Integers are widened in float columns; nulls fit every type.
    fn admit(&self, value: DataValue) -> std::result::Result<DataValue, DataValue> {
        match (self, value) {
            (_, DataValue::Null) => Ok(DataValue::Null),
            (ColumnType::Int64, v @ DataValue::Int(_)) => Ok(v),
            (ColumnType::Float64, v @ DataValue::Float(_)) => Ok(v),
            (ColumnType::Float64, DataValue::Int(i)) => Ok(DataValue::Float(i as f64)),
            (ColumnType::String, v @ DataValue::String(_)) => Ok(v),
            (_, other) => Err(other),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named, typed sequence of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    values: Vec<DataValue>,
}

impl Column {
    /// Creates a column, checking every value against the declared type.
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
        values: impl IntoIterator<Item = DataValue>,
    ) -> Result<Self> {
        let name = name.into();
        let values = values
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                column_type.admit(value).map_err(|rejected| {
                    DatasetError::type_mismatch(&name, row, column_type.name(), rejected.type_name())
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name,
            column_type,
            values,
        })
    }

    /// Creates an integer column.
    pub fn int64(name: impl Into<String>, values: impl IntoIterator<Item = Option<i64>>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Int64,
            values: values.into_iter().map(DataValue::from).collect(),
        }
    }

    /// Creates a float column.
    pub fn float64(name: impl Into<String>, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Float64,
            values: values.into_iter().map(DataValue::from).collect(),
        }
    }

    /// Creates a string column.
    pub fn string<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::String,
            values: values
                .into_iter()
                .map(|v| v.map_or(DataValue::Null, |s| DataValue::String(s.into())))
                .collect(),
        }
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared column type.
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Returns all values, nulls included, in row order.
    pub fn values(&self) -> &[DataValue] {
        &self.values
    }

    /// Returns the value at `row`.
    pub fn get(&self, row: usize) -> Option<&DataValue> {
        self.values.get(row)
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Counts missing values.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Iterates over present (non-null) values.
    pub fn present(&self) -> impl Iterator<Item = &DataValue> {
        self.values.iter().filter(|v| !v.is_null())
    }

    /// Collects present values of a numeric column as floats.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.present().filter_map(DataValue::as_float).collect()
    }
}

/// An ordered collection of equally sized columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Creates a dataset with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a dataset from columns, enforcing unique names and equal lengths.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        let mut seen = HashSet::new();

        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(DatasetError::DuplicateColumn(column.name().to_string()));
            }
            if column.len() != row_count {
                return Err(DatasetError::LengthMismatch {
                    column: column.name().to_string(),
                    expected: row_count,
                    actual: column.len(),
                });
            }
        }

        Ok(Self { columns, row_count })
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the dataset has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.columns.is_empty()
    }

    /// Returns the columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Looks up a column by name, failing if it is absent.
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| DatasetError::missing_column(name))
    }

    /// Returns true if a column with this name exists.
    pub fn contains_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Returns the column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Returns the values of one row, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&DataValue>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.iter().filter_map(|c| c.get(index)).collect())
    }

    /// Adds a column, or replaces the column with the same name in place.
    pub fn with_column(mut self, column: Column) -> Result<Self> {
        if !self.columns.is_empty() && column.len() != self.row_count {
            return Err(DatasetError::LengthMismatch {
                column: column.name().to_string(),
                expected: self.row_count,
                actual: column.len(),
            });
        }

        if self.columns.is_empty() {
            self.row_count = column.len();
        }

        match self.columns.iter().position(|c| c.name() == column.name()) {
            Some(index) => self.columns[index] = column,
            None => self.columns.push(column),
        }
        Ok(self)
    }

    /// Removes a column by name.
    pub fn drop_column(mut self, name: &str) -> Result<Self> {
        let index = self
            .columns
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| DatasetError::missing_column(name))?;
        self.columns.remove(index);
        if self.columns.is_empty() {
            self.row_count = 0;
        }
        Ok(self)
    }

    /// Keeps only the rows whose mask entry is `true`, preserving order.
    pub fn filter_rows(self, keep: &[bool]) -> Result<Self> {
        if keep.len() != self.row_count {
            return Err(DatasetError::MaskLength {
                expected: self.row_count,
                actual: keep.len(),
            });
        }

        let row_count = keep.iter().filter(|k| **k).count();
        let columns = self
            .columns
            .into_iter()
            .map(|Column { name, column_type, values }| Column {
                name,
                column_type,
                values: values
                    .into_iter()
                    .zip(keep)
                    .filter_map(|(value, &keep)| keep.then_some(value))
                    .collect(),
            })
            .collect();

        Ok(Self { columns, row_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_data_value_types() {
        assert_eq!(DataValue::Null.type_name(), "null");
        assert_eq!(DataValue::String("test".into()).type_name(), "string");
        assert_eq!(DataValue::Int(42).type_name(), "int64");
        assert_eq!(DataValue::Float(3.5).type_name(), "float64");
    }

    #[test]
    fn test_data_value_conversions() {
        let val = DataValue::String("hello".into());
        assert_eq!(val.as_string(), Some("hello"));
        assert_eq!(val.as_int(), None);

        let val = DataValue::Int(42);
        assert_eq!(val.as_int(), Some(42));
        assert_eq!(val.as_float(), Some(42.0));
        assert_eq!(val.as_string(), None);

        assert!(DataValue::Float(f64::NAN).is_null());
        assert_eq!(DataValue::Float(f64::NAN).as_float(), None);
    }

    #[test]
    fn test_float_display_keeps_decimal_point() {
        assert_eq!(DataValue::Float(50000.0).to_string(), "50000.0");
        assert_eq!(DataValue::Float(29.8).to_string(), "29.8");
        assert_eq!(DataValue::Int(7).to_string(), "7");
        assert_eq!(DataValue::Null.to_string(), "");
    }

    #[test]
    fn test_column_rejects_wrong_type() {
        let err = Column::new(
            "id",
            ColumnType::Int64,
            vec![DataValue::Int(1), DataValue::String("two".into())],
        )
        .unwrap_err();

        assert_eq!(
            err,
            DatasetError::type_mismatch("id", 1, "int64", "string")
        );
    }

    #[test]
    fn test_float_column_widens_integers() {
        let column = Column::new(
            "salario",
            ColumnType::Float64,
            vec![DataValue::Int(50000), DataValue::Null],
        )
        .unwrap();

        assert_eq!(column.values()[0], DataValue::Float(50000.0));
        assert_eq!(column.null_count(), 1);
    }

    #[test]
    fn test_dataset_rejects_ragged_columns() {
        let err = Dataset::new(vec![
            Column::int64("id", [Some(1), Some(2)]),
            Column::string("nome", [Some("Ana")]),
        ])
        .unwrap_err();

        assert!(matches!(err, DatasetError::LengthMismatch { .. }));
    }

    #[test]
    fn test_dataset_rejects_duplicate_names() {
        let err = Dataset::new(vec![
            Column::int64("id", [Some(1)]),
            Column::int64("id", [Some(2)]),
        ])
        .unwrap_err();

        assert_eq!(err, DatasetError::DuplicateColumn("id".to_string()));
    }

    #[test]
    fn test_with_column_replaces_in_place() {
        let dataset = Dataset::new(vec![
            Column::int64("id", [Some(1), Some(2)]),
            Column::string("nome", [Some("Ana"), None]),
        ])
        .unwrap()
        .with_column(Column::int64("id", [Some(10), Some(20)]))
        .unwrap();

        assert_eq!(dataset.column_names(), vec!["id", "nome"]);
        assert_eq!(dataset.column("id").unwrap().values()[0], DataValue::Int(10));
    }

    #[test]
    fn test_filter_rows_preserves_order() {
        let dataset = Dataset::new(vec![Column::int64("id", [Some(1), Some(2), Some(3)])])
            .unwrap()
            .filter_rows(&[true, false, true])
            .unwrap();

        assert_eq!(dataset.row_count(), 2);
        assert_eq!(
            dataset.column("id").unwrap().values(),
            &[DataValue::Int(1), DataValue::Int(3)]
        );
    }

    #[test]
    fn test_drop_column() {
        let dataset = Dataset::new(vec![
            Column::int64("id", [Some(1)]),
            Column::string("nome", [Some("Ana")]),
        ])
        .unwrap()
        .drop_column("nome")
        .unwrap();

        assert_eq!(dataset.column_names(), vec!["id"]);
        assert!(dataset.clone().drop_column("nome").is_err());
    }
}
