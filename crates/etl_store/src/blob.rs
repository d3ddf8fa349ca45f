//! Publishing of persisted artifacts to object storage.

use crate::{Result, StoreConfig, StoreError};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Outcome of making sure a bucket exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStatus {
    /// The bucket was already there
    Existing,
    /// The bucket was created by this call
    Created,
}

/// Object storage the pipeline publishes artifacts to.
///
/// Publishing copies a local file under a remote key. The local file is never
/// touched, so a failed publish leaves the persisted artifact in place.
pub trait BlobStore {
    /// Name of the target bucket.
    fn bucket(&self) -> &str;

    /// Creates the bucket if it does not exist yet.
    fn ensure_bucket(&self) -> Result<BucketStatus>;

    /// Uploads a local file under `key`.
    fn put(&self, local: &Path, key: &str) -> Result<()>;
}

/// Joins a remote prefix and the file name of a local artifact.
pub fn remote_key(prefix: &str, local: &Path) -> String {
    let name = local
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match prefix.trim_matches('/') {
        "" => name,
        prefix => format!("{prefix}/{name}"),
    }
}

/// A blob store backed by a local directory, one subdirectory per bucket.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    bucket: String,
    region: String,
}

impl LocalBlobStore {
    /// Creates a store from its configuration.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            root: config.root.clone(),
            bucket: config.bucket.clone(),
            region: config.region.clone(),
        }
    }

    /// Directory holding the bucket's objects.
    pub fn bucket_path(&self) -> PathBuf {
        self.root.join(&self.bucket)
    }

    /// Local path an object key maps to.
    ///
    /// # Errors
    ///
    /// Rejects empty keys and keys that would escape the bucket.
    pub fn object_path(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let is_plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        if key.is_empty() || !is_plain {
            return Err(StoreError::upload(key, "invalid object key"));
        }

        Ok(self.bucket_path().join(relative))
    }
}

impl BlobStore for LocalBlobStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn ensure_bucket(&self) -> Result<BucketStatus> {
        let path = self.bucket_path();
        if path.is_dir() {
            info!(bucket = %self.bucket, "Bucket already exists");
            return Ok(BucketStatus::Existing);
        }

        fs::create_dir_all(&path)
            .map_err(|e| StoreError::bucket_unavailable(&self.bucket, e.to_string()))?;
        info!(bucket = %self.bucket, region = %self.region, "Created bucket");
        Ok(BucketStatus::Created)
    }

    fn put(&self, local: &Path, key: &str) -> Result<()> {
        if !self.bucket_path().is_dir() {
            return Err(StoreError::bucket_unavailable(
                &self.bucket,
                "bucket does not exist",
            ));
        }

        let target = self.object_path(key)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::upload(key, e.to_string()))?;
        }
        fs::copy(local, &target).map_err(|e| StoreError::upload(key, e.to_string()))?;

        debug!(bucket = %self.bucket, key, "Uploaded object");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store(root: &Path) -> LocalBlobStore {
        LocalBlobStore::new(
            &StoreConfig::builder()
                .root(root)
                .bucket("test-bucket")
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_remote_key() {
        let local = Path::new("arquivos/final_data_1.csv");
        assert_eq!(remote_key("governed-data", local), "governed-data/final_data_1.csv");
        assert_eq!(remote_key("raw-data/", local), "raw-data/final_data_1.csv");
        assert_eq!(remote_key("", local), "final_data_1.csv");
    }

    #[test]
    fn test_ensure_bucket_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store(dir.path());

        assert_eq!(store.ensure_bucket().unwrap(), BucketStatus::Created);
        assert_eq!(store.ensure_bucket().unwrap(), BucketStatus::Existing);
        assert!(dir.path().join("test-bucket").is_dir());
    }

    #[test]
    fn test_put_copies_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir.path().join("lake"));
        store.ensure_bucket().unwrap();

        let local = dir.path().join("data.csv");
        fs::write(&local, "a\n1\n").unwrap();
        store.put(&local, "raw-data/data.csv").unwrap();

        let copied = dir.path().join("lake/test-bucket/raw-data/data.csv");
        assert_eq!(fs::read_to_string(copied).unwrap(), "a\n1\n");
        assert!(local.exists());
    }

    #[test]
    fn test_put_without_bucket_fails() {
        let dir = TempDir::new().unwrap();
        let store = store(dir.path());
        let local = dir.path().join("data.csv");
        fs::write(&local, "a\n").unwrap();

        let err = store.put(&local, "raw-data/data.csv").unwrap_err();
        assert!(matches!(err, StoreError::BucketUnavailable { .. }));
    }

    #[test]
    fn test_put_rejects_escaping_keys() {
        let dir = TempDir::new().unwrap();
        let store = store(dir.path());
        store.ensure_bucket().unwrap();
        let local = dir.path().join("data.csv");
        fs::write(&local, "a\n").unwrap();

        for key in ["", "../outside.csv", "/abs.csv", "a/../../b.csv"] {
            assert!(
                matches!(store.put(&local, key), Err(StoreError::Upload { .. })),
                "key '{key}' should be rejected"
            );
        }
    }

    #[test]
    fn test_put_missing_local_file_fails() {
        let dir = TempDir::new().unwrap();
        let store = store(dir.path());
        store.ensure_bucket().unwrap();

        let err = store
            .put(&dir.path().join("absent.csv"), "raw-data/absent.csv")
            .unwrap_err();
        assert!(matches!(err, StoreError::Upload { .. }));
    }
}
