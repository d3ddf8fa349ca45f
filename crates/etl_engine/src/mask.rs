//! Redaction of sensitive columns.

use crate::{EngineError, Result};
use etl_core::{Column, DataValue, Dataset};

/// Default mask character.
pub const MASK_CHAR: char = '*';

/// Replaces a sensitive column with a masked copy and drops the original.
///
/// The masked value keeps the first character and replaces every other
/// character with the mask character, so its length matches the original.
/// Missing and non-string values become the empty string.
///
/// # Example
///
/// ```rust
/// use etl_core::DatasetBuilder;
/// use etl_engine::Masker;
///
/// let dataset = DatasetBuilder::new()
///     .string("nome", [Some("Ana")])
///     .build()
///     .unwrap();
///
/// let masked = Masker::new().mask(dataset).unwrap();
/// assert!(!masked.contains_column("nome"));
/// assert_eq!(masked.column("nome_mascarado").unwrap().values()[0].as_string(), Some("A**"));
/// ```
#[derive(Debug, Clone)]
pub struct Masker {
    source: String,
    target: String,
    mask_char: char,
}

impl Masker {
    /// Creates a masker turning `nome` into `nome_mascarado`.
    pub fn new() -> Self {
        Self::with_columns("nome", "nome_mascarado")
    }

    /// Creates a masker for custom column names.
    pub fn with_columns(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            mask_char: MASK_CHAR,
        }
    }

    /// Sets the mask character.
    pub fn mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Masks the sensitive column.
    ///
    /// The masked column is appended after the remaining columns.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingColumn` if the source column is absent.
    pub fn mask(&self, dataset: Dataset) -> Result<Dataset> {
        let source = dataset
            .column(&self.source)
            .ok_or_else(|| EngineError::missing_column(self.source.as_str()))?;

        let masked = Column::string(
            self.target.as_str(),
            source
                .values()
                .iter()
                .map(|value| Some(mask_value(value, self.mask_char))),
        );

        Ok(dataset.drop_column(&self.source)?.with_column(masked)?)
    }
}

impl Default for Masker {
    fn default() -> Self {
        Self::new()
    }
}

/// Masks one value: first character kept, the rest replaced.
pub fn mask_value(value: &DataValue, mask_char: char) -> String {
    let Some(text) = value.as_string() else {
        return String::new();
    };

    let mut chars = text.chars();
    match chars.next() {
        Some(first) => std::iter::once(first)
            .chain(chars.map(|_| mask_char))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etl_core::DatasetBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mask_value() {
        assert_eq!(mask_value(&DataValue::String("Ana".into()), '*'), "A**");
        assert_eq!(mask_value(&DataValue::String("M".into()), '*'), "M");
        assert_eq!(mask_value(&DataValue::String("João".into()), '#'), "J###");
        assert_eq!(mask_value(&DataValue::String(String::new()), '*'), "");
        assert_eq!(mask_value(&DataValue::Null, '*'), "");
        assert_eq!(mask_value(&DataValue::Int(42), '*'), "");
    }

    #[test]
    fn test_mask_replaces_column() {
        let dataset = DatasetBuilder::new()
            .int64("id", [Some(1), Some(2), Some(3)])
            .string("nome", [Some("Mariana"), None, Some("Ana")])
            .float64("salario", [Some(1.0), Some(2.0), Some(3.0)])
            .build()
            .unwrap();

        let masked = Masker::new().mask(dataset).unwrap();

        assert_eq!(masked.column_names(), vec!["id", "salario", "nome_mascarado"]);
        assert_eq!(
            masked.column("nome_mascarado").unwrap(),
            &Column::string("nome_mascarado", [Some("M******"), Some(""), Some("A**")])
        );
        assert_eq!(masked.row_count(), 3);
    }

    #[test]
    fn test_mask_custom_char() {
        let dataset = DatasetBuilder::new()
            .string("nome", [Some("Caio")])
            .build()
            .unwrap();

        let masked = Masker::new().mask_char('x').mask(dataset).unwrap();
        assert_eq!(
            masked.column("nome_mascarado").unwrap().values()[0],
            DataValue::String("Cxxx".into())
        );
    }

    #[test]
    fn test_mask_requires_source() {
        let dataset = DatasetBuilder::new().int64("id", [Some(1)]).build().unwrap();
        assert!(matches!(
            Masker::new().mask(dataset),
            Err(EngineError::MissingColumn(ref c)) if c == "nome"
        ));
    }
}
