//! Bearer token persistence.
//!
//! The token lives in a small JSON key/value file under the storage
//! directory, keyed by [`TOKEN_STORAGE_KEY`]. Other keys in the file are left
//! untouched.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use pdfshelf_core::constants::{LOCAL_STORAGE_FILE, TOKEN_STORAGE_KEY};

use crate::error::ApiError;

/// Where the bearer token is kept between runs.
pub trait TokenStore: Send + Sync + Debug {
    /// # Errors
    /// Returns [`ApiError::Storage`] when the backing store cannot be read.
    fn load(&self) -> Result<Option<String>, ApiError>;

    /// # Errors
    /// Returns [`ApiError::Storage`] when the backing store cannot be written.
    fn save(&self, token: &str) -> Result<(), ApiError>;

    /// # Errors
    /// Returns [`ApiError::Storage`] when the backing store cannot be written.
    fn clear(&self) -> Result<(), ApiError>;
}

/// Token store backed by `storage.json` in a directory.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self { path: dir.join(LOCAL_STORAGE_FILE), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, ApiError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(ApiError::Storage(format!("{}: {e}", self.path.display()))),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "corrupt local storage, starting empty");
                Ok(BTreeMap::new())
            },
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ApiError::Storage(format!("{}: {e}", parent.display())))?;
        }
        let body = serde_json::to_string_pretty(map)
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        std::fs::write(&self.path, body)
            .map_err(|e| ApiError::Storage(format!("{}: {e}", self.path.display())))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, ApiError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_map()?.remove(TOKEN_STORAGE_KEY).filter(|t| !t.is_empty()))
    }

    fn save(&self, token: &str) -> Result<(), ApiError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_map()?;
        map.insert(TOKEN_STORAGE_KEY.to_owned(), token.to_owned());
        self.write_map(&map)
    }

    fn clear(&self) -> Result<(), ApiError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_map()?;
        if map.remove(TOKEN_STORAGE_KEY).is_none() {
            return Ok(());
        }
        self.write_map(&map)
    }
}

/// In-process token store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Mutex::new(Some(token.into())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, ApiError> {
        Ok(self.token.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, token: &str) -> Result<(), ApiError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), ApiError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
