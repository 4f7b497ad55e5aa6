//! The signed-in user's PDFs: server-paginated, searchable by the server.

use std::sync::Arc;

use async_trait::async_trait;
use pdfshelf_client::Download;
use pdfshelf_core::{FileRecord, PaginationMode, ShareLink, UploadDraft, ValidationErrors};

use crate::error::ServiceError;
use crate::objects::{ObjectHandle, ObjectStore};
use crate::resource::{Fetched, ItemCreator, ItemDownloader, ItemRemover, ListSource, PageQuery};
use crate::session::Session;

#[derive(Debug, Clone)]
pub struct FileResource {
    session: Session,
}

impl FileResource {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Creates a share link for a file.
    pub async fn share(&self, id: u64) -> Result<ShareLink, ServiceError> {
        self.session.require_token()?;
        let link = self.session.api().share_file(id).await?;
        tracing::info!(file_id = id, share_id = %link.shareable_id, "share link created");
        Ok(link)
    }

    /// Fetches a file for viewing; the object lives as long as the handle.
    pub async fn preview(&self, id: u64, objects: Arc<dyn ObjectStore>) -> Result<ObjectHandle, ServiceError> {
        self.session.require_token()?;
        let content = self.session.api().view_file(id).await?;
        ObjectHandle::materialize(objects, &content.bytes, content.content_type.as_deref())
    }
}

#[async_trait]
impl ListSource for FileResource {
    type Item = FileRecord;

    fn label(&self) -> &'static str {
        "file"
    }

    fn mode(&self) -> PaginationMode {
        PaginationMode::Server
    }

    fn precheck(&self) -> Result<(), ServiceError> {
        self.session.require_token().map(|_| ())
    }

    async fn fetch(&self, query: &PageQuery) -> Result<Fetched<FileRecord>, ServiceError> {
        self.session.require_token()?;
        let term = query.search_term.trim();
        let page = if term.is_empty() {
            self.session.api().list_my_files(query.page, query.page_size).await?
        } else {
            self.session.api().search_files(term, query.page, query.page_size).await?
        };
        let total = usize::try_from(page.total).unwrap_or(usize::MAX);
        Ok(Fetched { items: page.data, total })
    }
}

#[async_trait]
impl ItemCreator for FileResource {
    type Draft = UploadDraft;

    fn validate_draft(&self, draft: &UploadDraft, _existing: &[FileRecord]) -> Result<(), ValidationErrors> {
        draft.validate()
    }

    async fn create(&self, draft: &UploadDraft) -> Result<Option<FileRecord>, ServiceError> {
        self.session.require_token()?;
        let record = self.session.api().upload_file(draft).await?;
        Ok(Some(record))
    }
}

#[async_trait]
impl ItemRemover for FileResource {
    async fn remove(&self, id: u64) -> Result<(), ServiceError> {
        self.session.require_token()?;
        Ok(self.session.api().delete_file(id).await?)
    }
}

#[async_trait]
impl ItemDownloader for FileResource {
    async fn fetch_content(&self, id: u64) -> Result<Download, ServiceError> {
        self.session.require_token()?;
        Ok(self.session.api().download_file(id).await?)
    }

    fn file_name(&self, item: &FileRecord) -> String {
        item.name.clone()
    }
}
