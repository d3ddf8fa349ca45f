//! Artifact persistence and lineage sidecars.
//!
//! An artifact `X` is accompanied by `X.lineage.json`, a serialized
//! [`Lineage`] record. Output names are derived from the stage and the
//! lineage `source_id` alone, and existing files are never overwritten.

use crate::{Result, StoreError};
use etl_core::{Dataset, Lineage, StageKind};
use etl_parser::write_csv;
use regex::Regex;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Suffix appended to an artifact's file name to name its lineage sidecar.
pub const LINEAGE_SUFFIX: &str = ".lineage.json";

static TRAILING_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9_]+$").expect("token pattern is valid"));

/// Path of the lineage sidecar for an artifact.
pub fn lineage_path(artifact: &Path) -> PathBuf {
    let mut name = artifact.file_name().unwrap_or_default().to_os_string();
    name.push(LINEAGE_SUFFIX);
    artifact.with_file_name(name)
}

/// Reads the lineage sidecar of an artifact, if there is one.
pub fn read_lineage(artifact: &Path) -> Result<Option<Lineage>> {
    match fs::read_to_string(lineage_path(artifact)) {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Source id for an artifact that has no lineage sidecar.
///
/// Uses the trailing run of digits and underscores in the file stem, trimmed
/// of underscores, or the whole stem when there is none.
pub fn fallback_source_id(artifact: &Path) -> String {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    TRAILING_TOKEN
        .find(&stem)
        .map(|m| m.as_str().trim_matches('_'))
        .filter(|token| !token.is_empty())
        .map_or_else(|| stem.clone(), str::to_string)
}

/// Checks that a source id names a single path component.
///
/// Source ids read from sidecars end up in output file names, so separators
/// and `.`/`..` are rejected.
pub fn validate_source_id(source_id: &str) -> Result<()> {
    let mut components = Path::new(source_id).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if single && !source_id.contains(['/', '\\']) {
        Ok(())
    } else {
        Err(StoreError::InvalidSourceId(source_id.to_string()))
    }
}

/// Lineage of the artifact a stage produces from `input`.
///
/// The source id comes from the input's sidecar when present, otherwise from
/// [`fallback_source_id`].
pub fn derive_lineage(input: &Path, stage: StageKind) -> Result<Lineage> {
    let parent = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let lineage = match read_lineage(input)? {
        Some(upstream) => upstream.derive(stage, parent),
        None => {
            let source_id = fallback_source_id(input);
            warn!(
                artifact = %input.display(),
                source_id = %source_id,
                "No lineage record, deriving source id from file name"
            );
            let mut lineage = Lineage::origin(source_id, stage);
            lineage.parent = Some(parent);
            lineage
        }
    };

    validate_source_id(&lineage.source_id)?;
    Ok(lineage)
}

/// Writes stage artifacts into a working directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    directory: PathBuf,
}

impl ArtifactStore {
    /// Creates a store rooted at a working directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Returns the working directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path the artifact described by `lineage` is written to.
    pub fn target(&self, lineage: &Lineage) -> Result<PathBuf> {
        validate_source_id(&lineage.source_id)?;
        let name = lineage
            .stage
            .artifact_name(&lineage.source_id)
            .ok_or(StoreError::NoArtifact(lineage.stage))?;
        Ok(self.directory.join(name))
    }

    /// Persists a dataset as CSV.
    pub fn persist_dataset(
        &self,
        dataset: &Dataset,
        lineage: &Lineage,
        input: Option<&Path>,
    ) -> Result<PathBuf> {
        self.persist(lineage, input, |writer| Ok(write_csv(dataset, writer)?))
    }

    /// Persists a text document.
    pub fn persist_text(
        &self,
        content: &str,
        lineage: &Lineage,
        input: Option<&Path>,
    ) -> Result<PathBuf> {
        self.persist(lineage, input, |writer| Ok(writer.write_all(content.as_bytes())?))
    }

    /// Creates the artifact, fills it with `write` and records its lineage.
    ///
    /// The target must not exist yet. If `write` or the sidecar fails the
    /// partial file is removed. When `input` is given, the artifact's modification time is
    /// kept strictly after the input's so that the locator sees it as newer.
    pub fn persist<F>(&self, lineage: &Lineage, input: Option<&Path>, write: F) -> Result<PathBuf>
    where
        F: FnOnce(&mut BufWriter<&File>) -> Result<()>,
    {
        fs::create_dir_all(&self.directory)?;
        let path = self.target(lineage)?;

        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::ArtifactExists(path));
            }
            Err(e) => return Err(e.into()),
        };

        let written = Self::fill(&file, write)
            .and_then(|()| match input {
                Some(input) => Self::stamp_after(&file, input),
                None => Ok(()),
            })
            .and_then(|()| Self::write_lineage(&path, lineage));
        if let Err(e) = written {
            drop(file);
            let _ = fs::remove_file(&path);
            return Err(e);
        }

        info!(artifact = %path.display(), source_id = %lineage.source_id, "Persisted artifact");
        Ok(path)
    }

    fn fill<F>(file: &File, write: F) -> Result<()>
    where
        F: FnOnce(&mut BufWriter<&File>) -> Result<()>,
    {
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn write_lineage(artifact: &Path, lineage: &Lineage) -> Result<()> {
        let sidecar = lineage_path(artifact);
        let content = serde_json::to_string_pretty(lineage)?;
        if let Err(e) = fs::write(&sidecar, content) {
            let _ = fs::remove_file(&sidecar);
            return Err(e.into());
        }
        Ok(())
    }

    /// Moves the file's modification time past the input's if needed.
    fn stamp_after(file: &File, input: &Path) -> Result<()> {
        let input_modified = fs::metadata(input)?.modified()?;
        if file.metadata()?.modified()? <= input_modified {
            let stamp = input_modified + Duration::from_millis(1);
            file.set_modified(stamp)?;
            debug!("Advanced artifact modification time past its input");
        }
        Ok(())
    }
}
