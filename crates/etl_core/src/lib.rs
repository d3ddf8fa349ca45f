//! # ETL Core
//!
//! Core data structures shared by every stage of the batch ETL pipeline.
//!
//! ## Key Concepts
//!
//! - **Dataset**: ordered, typed columns of equal length; its structural
//!   contract is checked once, at construction
//! - **Expectation**: a declarative data-quality assertion on one column
//! - **Reports**: observability metrics and validation results
//! - **Lineage**: the record correlating an artifact to the one it came from
//!
//! ## Example
//!
//! ```rust
//! use etl_core::{DatasetBuilder, Expectation};
//!
//! let dataset = DatasetBuilder::new()
//!     .int64("id", [Some(1), Some(2)])
//!     .string("nome", [Some("Mariana"), None])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(dataset.column("nome").unwrap().null_count(), 1);
//!
//! let expectation = Expectation::not_null("nome");
//! assert_eq!(expectation.column, "nome");
//! ```

pub mod builder;
pub mod dataset;
pub mod error;
pub mod expectation;
pub mod lineage;
pub mod report;

pub use builder::*;
pub use dataset::*;
pub use error::*;
pub use expectation::*;
pub use lineage::*;
pub use report::*;
