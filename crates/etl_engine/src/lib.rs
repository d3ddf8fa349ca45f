//! # ETL Engine
//!
//! The transformations and inspections applied to datasets by the pipeline
//! stages:
//!
//! - [`SchemaCoercer`]: numeric coercion, clipping and imputation of raw data
//! - [`MetricsEngine`]: quantitative and categorical observability metrics
//! - [`QualityValidator`]: evaluation of expectation suites
//! - [`Enricher`]: salary banding
//! - [`Masker`]: redaction of the name column
//!
//! Every component is a pure function of its input dataset; none of them
//! touch the filesystem.
//!
//! ## Example
//!
//! ```rust
//! use etl_core::DatasetBuilder;
//! use etl_engine::{default_suite, Enricher, Masker, QualityValidator, SchemaCoercer};
//!
//! let raw = DatasetBuilder::new()
//!     .string("id", [Some("1"), Some("seis")])
//!     .string("nome", [Some("Ana"), Some("Caio")])
//!     .string("idade", [Some("30"), Some("41")])
//!     .float64("salario", [Some(75000.0), None])
//!     .build()
//!     .unwrap();
//!
//! let clean = SchemaCoercer::new().coerce(raw).unwrap();
//! let result = QualityValidator::new().validate(&clean, &default_suite());
//! assert!(result.success);
//!
//! let governed = Masker::new().mask(Enricher::new().enrich(clean).unwrap()).unwrap();
//! assert!(governed.contains_column("faixa_salarial"));
//! ```

mod coerce;
mod enrich;
mod error;
mod mask;
mod metrics;
mod quality;
pub mod stats;

pub use coerce::*;
pub use enrich::*;
pub use error::*;
pub use mask::*;
pub use metrics::*;
pub use quality::*;
