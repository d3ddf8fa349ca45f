use crate::stage::timestamp_id;
use crate::{Result, Stage, StageError, Transformed};
use etl_core::{Dataset, DatasetBuilder, DatasetError, StageKind};
use tracing::info;

/// The raw sample: one spelled-out id, a missing name, gaps and bad ages.
pub fn sample_dataset() -> std::result::Result<Dataset, DatasetError> {
    DatasetBuilder::new()
        .string(
            "id",
            ["1", "2", "3", "4", "5", "seis", "7"].map(Some),
        )
        .string(
            "nome",
            [
                Some("Mariana"),
                Some("Gabriel"),
                Some("Carlos"),
                None,
                Some("Ana"),
                Some("Francisco"),
                Some("Helena"),
            ],
        )
        .string(
            "idade",
            [
                Some("26"),
                None,
                Some("35"),
                Some("28"),
                Some("-6"),
                Some("40"),
                Some("unknown"),
            ],
        )
        .int64(
            "salario",
            [
                Some(50_000),
                Some(60_000),
                None,
                Some(70_000),
                Some(80_000),
                Some(90_000),
                Some(100_000),
            ],
        )
        .build()
}

/// Writes the raw sample dataset and starts a lineage chain.
#[derive(Debug, Clone, Default)]
pub struct GenerateStage {
    source_id: Option<String>,
}

impl GenerateStage {
    /// Creates a stage that names its artifact after the current time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a fixed source id instead of the current time.
    pub fn with_source_id(source_id: impl Into<String>) -> Self {
        Self {
            source_id: Some(source_id.into()),
        }
    }
}

impl Stage for GenerateStage {
    fn kind(&self) -> StageKind {
        StageKind::Generate
    }

    fn consumes_input(&self) -> bool {
        false
    }

    fn origin_id(&self) -> String {
        self.source_id.clone().unwrap_or_else(timestamp_id)
    }

    fn transform(&self, _input: Option<Dataset>) -> Result<Transformed> {
        let dataset = sample_dataset().map_err(|e| StageError::invalid_input(e.to_string()))?;
        info!(rows = dataset.row_count(), "Created sample data");
        Ok(Transformed::dataset(dataset))
    }
}
