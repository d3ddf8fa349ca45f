//! Discovery of the artifact a stage consumes.

use crate::{Result, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Finds the most recently modified artifact in a directory.
///
/// Only regular files directly under the directory whose name ends with the
/// requested extension are considered. Candidates are visited in file name
/// order and the first one with the greatest modification time wins, so ties
/// resolve the same way for a given directory state.
pub struct ArtifactLocator;

impl ArtifactLocator {
    /// Creates a new locator.
    pub fn new() -> Self {
        Self
    }

    /// Returns the latest artifact with the given extension.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ArtifactNotFound` if the directory is missing or
    /// holds no matching file.
    pub fn latest(&self, directory: &Path, extension: &str) -> Result<PathBuf> {
        let mut latest: Option<(SystemTime, PathBuf)> = None;

        for path in self.candidates(directory, extension)? {
            let modified = fs::metadata(&path)?.modified()?;
            if latest.as_ref().is_none_or(|(best, _)| modified > *best) {
                latest = Some((modified, path));
            }
        }

        let (_, path) = latest.ok_or_else(|| StoreError::ArtifactNotFound {
            directory: directory.to_path_buf(),
            extension: extension.to_string(),
        })?;

        debug!(artifact = %path.display(), "Located latest artifact");
        Ok(path)
    }

    /// Lists matching artifacts in file name order.
    pub fn candidates(&self, directory: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::ArtifactNotFound {
                    directory: directory.to_path_buf(),
                    extension: extension.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(extension));

            if matches && path.is_file() {
                paths.push(path);
            }
        }

        paths.sort();
        Ok(paths)
    }
}

impl Default for ArtifactLocator {
    fn default() -> Self {
        Self::new()
    }
}
