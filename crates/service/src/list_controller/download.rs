use std::path::PathBuf;
use std::sync::Arc;

use pdfshelf_core::ListItem;

use super::ListController;
use crate::error::ServiceError;
use crate::objects::{ObjectHandle, SaveSink};
use crate::resource::{ItemDownloader, ItemId};

impl<R: ItemDownloader> ListController<R> {
    /// Fetches an item's content and hands it to `sink`.
    ///
    /// The transient object is released exactly once, whether or not saving
    /// succeeds.
    pub async fn download(&self, id: ItemId<R>, sink: &dyn SaveSink) -> Result<PathBuf, ServiceError> {
        self.ensure_open()?;
        let content = self
            .inner
            .resource
            .fetch_content(id)
            .await
            .inspect_err(|e| self.report_failure("download", e))?;

        let local_name = {
            let state = self.inner.state.lock().await;
            state
                .items
                .iter()
                .find(|item| item.id() == id)
                .map(|item| self.inner.resource.file_name(item))
        };
        let file_name = content
            .file_name
            .clone()
            .or(local_name)
            .unwrap_or_else(|| format!("{}-{id}", self.label()));

        let handle = ObjectHandle::materialize(
            Arc::clone(&self.inner.objects),
            &content.bytes,
            content.content_type.as_deref(),
        )
        .inspect_err(|e| self.report_failure("download", e))?;
        let saved = sink.save_as(&handle, &file_name).await;
        drop(handle);

        let path = saved.inspect_err(|e| self.report_failure("save", e))?;
        tracing::info!(resource = self.label(), %id, path = %path.display(), "downloaded");
        self.inner.notifier.success(&format!("{} downloaded successfully", self.title()));
        Ok(path)
    }
}
