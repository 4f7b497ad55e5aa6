//! Transient local objects for downloaded content.
//!
//! A downloaded body is materialized by an [`ObjectStore`] and handed out as
//! an [`ObjectHandle`]. The handle releases its object exactly once, when it
//! is dropped.

use std::fmt::Debug;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ServiceError;

/// Creates and releases transient objects.
pub trait ObjectStore: Send + Sync + Debug {
    /// Stores `bytes` and returns where they can be read from.
    ///
    /// # Errors
    /// Returns an error when the object cannot be written.
    fn materialize(&self, bytes: &[u8], content_type: Option<&str>) -> Result<PathBuf, ServiceError>;

    /// Frees an object returned by [`materialize`](Self::materialize).
    fn release(&self, location: &Path);
}

/// Scoped reference to a materialized object.
#[derive(Debug)]
pub struct ObjectHandle {
    location: PathBuf,
    size: usize,
    store: Arc<dyn ObjectStore>,
}

impl ObjectHandle {
    /// # Errors
    /// Returns an error when the store cannot write the object.
    pub fn materialize(
        store: Arc<dyn ObjectStore>,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<Self, ServiceError> {
        let location = store.materialize(bytes, content_type)?;
        tracing::debug!(location = %location.display(), size = bytes.len(), "object created");
        Ok(Self { location, size: bytes.len(), store })
    }

    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }
}

impl Drop for ObjectHandle {
    fn drop(&mut self) {
        tracing::debug!(location = %self.location.display(), "object released");
        self.store.release(&self.location);
    }
}

/// Writes objects to named temporary files.
#[derive(Debug, Default, Clone)]
pub struct TempFileStore {
    dir: Option<PathBuf>,
}

impl TempFileStore {
    #[must_use]
    pub const fn new() -> Self {
        Self { dir: None }
    }

    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: Some(dir.into()) }
    }
}

impl ObjectStore for TempFileStore {
    fn materialize(&self, bytes: &[u8], content_type: Option<&str>) -> Result<PathBuf, ServiceError> {
        let suffix = match content_type {
            Some(ct) if ct.starts_with("application/pdf") => ".pdf",
            _ => ".bin",
        };
        let mut builder = tempfile::Builder::new();
        builder.prefix("pdfshelf-").suffix(suffix);
        let mut file = match &self.dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(bytes)?;
        file.flush()?;
        let (_, path) = file.keep().map_err(|e| ServiceError::Io(e.error))?;
        Ok(path)
    }

    fn release(&self, location: &Path) {
        if let Err(e) = std::fs::remove_file(location) {
            tracing::warn!(location = %location.display(), error = %e, "failed to release object");
        }
    }
}

/// Hands a materialized object to the user under a file name.
#[async_trait]
pub trait SaveSink: Send + Sync {
    /// Returns where the object ended up.
    async fn save_as(&self, object: &ObjectHandle, file_name: &str) -> Result<PathBuf, ServiceError>;
}

/// Copies objects into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl SaveSink for DirectorySink {
    async fn save_as(&self, object: &ObjectHandle, file_name: &str) -> Result<PathBuf, ServiceError> {
        let name = Path::new(file_name)
            .file_name()
            .map_or_else(|| "download".into(), |n| n.to_os_string());
        tokio::fs::create_dir_all(&self.dir).await?;
        let target = self.dir.join(name);
        tokio::fs::copy(object.location(), &target).await?;
        tracing::info!(path = %target.display(), bytes = object.size(), "saved");
        Ok(target)
    }
}
