//! Access to files through share links, without signing in.

use std::path::PathBuf;
use std::sync::Arc;

use pdfshelf_client::ApiClient;
use pdfshelf_core::{FileRecord, ValidationErrors};

use crate::error::ServiceError;
use crate::objects::{ObjectHandle, ObjectStore, SaveSink};

#[derive(Debug, Clone)]
pub struct SharedFiles {
    api: ApiClient,
    objects: Arc<dyn ObjectStore>,
}

impl SharedFiles {
    #[must_use]
    pub fn new(api: ApiClient, objects: Arc<dyn ObjectStore>) -> Self {
        Self { api, objects }
    }

    pub async fn get(&self, share_id: &str) -> Result<FileRecord, ServiceError> {
        let share_id = checked_share_id(share_id)?;
        Ok(self.api.get_shared(share_id).await?)
    }

    /// Downloads a shared file into `sink`, releasing the transient object afterwards.
    pub async fn download(&self, share_id: &str, sink: &dyn SaveSink) -> Result<PathBuf, ServiceError> {
        let share_id = checked_share_id(share_id)?;
        let content = self.api.download_shared(share_id).await?;
        let file_name = content.file_name.clone().unwrap_or_else(|| format!("{share_id}.pdf"));
        let handle = ObjectHandle::materialize(
            Arc::clone(&self.objects),
            &content.bytes,
            content.content_type.as_deref(),
        )?;
        let saved = sink.save_as(&handle, &file_name).await;
        drop(handle);
        saved
    }
}

fn checked_share_id(share_id: &str) -> Result<&str, ServiceError> {
    let share_id = share_id.trim();
    if share_id.is_empty() {
        let mut errors = ValidationErrors::new();
        errors.push("shareId", "Invalid share link");
        return Err(errors.into());
    }
    Ok(share_id)
}
