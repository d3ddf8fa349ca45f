//! Pipeline stages for the batch ETL.
//!
//! Each stage locates the newest dataset artifact in the working directory,
//! loads it, transforms it, persists the result next to a lineage sidecar and
//! optionally publishes it to a blob store:
//!
//! ```text
//! generate -> upload-raw -> observe -> clean -> validate -> enrich -> mask
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use etl_core::StageKind;
//! use etl_stages::{Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::load(None)?;
//! let pipeline = Pipeline::local(config);
//!
//! let report = pipeline.run(StageKind::Generate)?;
//! println!("wrote {:?}", report.artifact);
//! # Ok::<(), etl_stages::StageError>(())
//! ```

mod config;
mod error;
mod pipeline;
pub mod render;
mod stage;
pub mod stages;

pub use config::*;
pub use error::*;
pub use pipeline::*;
pub use render::{HtmlRenderer, JsonRenderer, Renderer};
pub use stage::*;
