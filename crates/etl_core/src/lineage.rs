//! Artifact lineage.
//!
//! Every artifact a stage persists carries a [`Lineage`] record. Downstream
//! stages read the record of their input and reuse its `source_id` to name
//! their own output, so the chain from raw file to governed file is
//! recoverable by value instead of by parsing file names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The stages of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Writes the raw sample dataset
    Generate,
    /// Publishes the raw dataset to the blob store
    UploadRaw,
    /// Computes observability metrics
    Observe,
    /// Coerces and imputes the raw dataset
    Clean,
    /// Evaluates expectations and renders a report
    Validate,
    /// Adds derived columns
    Enrich,
    /// Redacts sensitive columns
    Mask,
}

impl StageKind {
    /// All stages in pipeline order.
    pub const ALL: [StageKind; 7] = [
        StageKind::Generate,
        StageKind::UploadRaw,
        StageKind::Observe,
        StageKind::Clean,
        StageKind::Validate,
        StageKind::Enrich,
        StageKind::Mask,
    ];

    /// Returns the stage name.
    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Generate => "generate",
            StageKind::UploadRaw => "upload-raw",
            StageKind::Observe => "observe",
            StageKind::Clean => "clean",
            StageKind::Validate => "validate",
            StageKind::Enrich => "enrich",
            StageKind::Mask => "mask",
        }
    }

    /// File name prefix of the artifact the stage persists, if any.
    pub fn artifact_prefix(&self) -> Option<&'static str> {
        match self {
            StageKind::Generate => Some("processed_data"),
            StageKind::UploadRaw => None,
            StageKind::Observe => Some("observability"),
            StageKind::Clean => Some("cleaned_data"),
            StageKind::Validate => Some("clean_data_validation_report"),
            StageKind::Enrich => Some("enriched_data"),
            StageKind::Mask => Some("final_data"),
        }
    }

    /// File extension of the persisted artifact, including the dot.
    pub fn artifact_extension(&self) -> &'static str {
        match self {
            StageKind::Observe => ".json",
            StageKind::Validate => ".html",
            _ => ".csv",
        }
    }

    /// Logical prefix under which the stage publishes to the blob store.
    pub fn remote_prefix(&self) -> Option<&'static str> {
        match self {
            StageKind::UploadRaw => Some("raw-data"),
            StageKind::Observe => Some("observability"),
            StageKind::Clean => Some("processed-data"),
            StageKind::Enrich => Some("enriched-data"),
            StageKind::Mask => Some("governed-data"),
            StageKind::Generate | StageKind::Validate => None,
        }
    }

    /// Derives the artifact file name for a lineage source id.
    ///
    /// The name is a pure function of the stage and the source id, so two
    /// runs over the same input always target the same path.
    pub fn artifact_name(&self, source_id: &str) -> Option<String> {
        self.artifact_prefix()
            .map(|prefix| format!("{prefix}_{source_id}{}", self.artifact_extension()))
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lineage metadata persisted next to an artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineage {
    /// Identifier shared by every artifact derived from the same raw file
    pub source_id: String,

    /// Stage that produced the artifact
    pub stage: StageKind,

    /// When the artifact was produced
    pub created_at: DateTime<Utc>,

    /// File name of the artifact this one was derived from
    pub parent: Option<String>,
}

impl Lineage {
    /// Starts a new lineage chain.
    pub fn origin(source_id: impl Into<String>, stage: StageKind) -> Self {
        Self {
            source_id: source_id.into(),
            stage,
            created_at: Utc::now(),
            parent: None,
        }
    }

    /// Derives the lineage of an artifact produced from this one.
    pub fn derive(&self, stage: StageKind, parent: impl Into<String>) -> Self {
        Self {
            source_id: self.source_id.clone(),
            stage,
            created_at: Utc::now(),
            parent: Some(parent.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_artifact_names() {
        let id = "20240131_101500";
        assert_eq!(
            StageKind::Generate.artifact_name(id).as_deref(),
            Some("processed_data_20240131_101500.csv")
        );
        assert_eq!(
            StageKind::Observe.artifact_name(id).as_deref(),
            Some("observability_20240131_101500.json")
        );
        assert_eq!(
            StageKind::Validate.artifact_name(id).as_deref(),
            Some("clean_data_validation_report_20240131_101500.html")
        );
        assert_eq!(StageKind::UploadRaw.artifact_name(id), None);
    }

    #[test]
    fn test_derive_keeps_source_id() {
        let origin = Lineage::origin("42", StageKind::Generate);
        let derived = origin.derive(StageKind::Clean, "processed_data_42.csv");

        assert_eq!(derived.source_id, "42");
        assert_eq!(derived.stage, StageKind::Clean);
        assert_eq!(derived.parent.as_deref(), Some("processed_data_42.csv"));
    }

    #[test]
    fn test_lineage_round_trips_through_json() {
        let lineage = Lineage::origin("7", StageKind::Mask);
        let json = serde_json::to_string(&lineage).unwrap();
        let back: Lineage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lineage);
    }
}
