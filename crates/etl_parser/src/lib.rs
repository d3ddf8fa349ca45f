//! Parsing for pipeline inputs: CSV datasets and YAML/TOML/JSON documents.
//!
//! Datasets travel between stages as CSV artifacts; see [`table`] for the
//! codec and its type-inference rules. Configuration files and expectation
//! suites are structured documents whose format is detected from the file
//! extension.
//!
//! # Example
//!
//! ```rust
//! use etl_core::ExpectationSuite;
//! use etl_parser::parse_yaml;
//!
//! let yaml = r#"
//! name: clean_data
//! expectations:
//!   - column: id
//!     kind: column_exists
//!   - column: idade
//!     kind: in_range
//!     min: 0
//!     max: 120
//! "#;
//!
//! let suite: ExpectationSuite = parse_yaml(yaml).expect("Failed to parse suite");
//! assert_eq!(suite.expectations.len(), 2);
//! ```

pub mod table;

pub use table::{read_csv, read_csv_file, write_csv};

use etl_core::DatasetError;
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while parsing datasets or documents.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// CSV reading or writing failed
    #[error("Malformed CSV: {0}")]
    CsvError(#[from] csv::Error),

    /// The parsed table violates the dataset contract
    #[error("Invalid dataset: {0}")]
    DatasetError(#[from] DatasetError),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported structured document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Parse a document from a YAML string.
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T> {
    Ok(serde_yaml_ng::from_str(content)?)
}

/// Parse a document from a TOML string.
pub fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T> {
    toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))
}

/// Parse a document from a JSON string.
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T> {
    Ok(serde_json::from_str(content)?)
}

/// Detect the document format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `DocumentFormat::Yaml`
/// * `.toml` → `DocumentFormat::Toml`
/// * `.json` → `DocumentFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<DocumentFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(DocumentFormat::Yaml),
        "toml" => Ok(DocumentFormat::Toml),
        "json" => Ok(DocumentFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a document from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use etl_core::ExpectationSuite;
/// use etl_parser::parse_file;
/// use std::path::Path;
///
/// let suite: ExpectationSuite = parse_file(Path::new("expectations.yml")).unwrap();
/// println!("Loaded suite: {}", suite.name);
/// ```
pub fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        DocumentFormat::Yaml => parse_yaml(&content),
        DocumentFormat::Toml => parse_toml(&content),
        DocumentFormat::Json => parse_json(&content),
    }
}
