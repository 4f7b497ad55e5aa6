//! File and share-link endpoints.

use pdfshelf_core::{FilePage, FileRecord, ShareLink, UploadDraft};
use reqwest::multipart::{Form, Part};

use crate::client::{ApiClient, Download};
use crate::error::ApiError;

impl ApiClient {
    /// `GET /api/files/my`
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status or a malformed body.
    pub async fn list_my_files(&self, page: usize, page_size: usize) -> Result<FilePage, ApiError> {
        let request = self
            .client
            .get(self.url("/api/files/my"))
            .query(&[("page", page.to_string()), ("page_size", page_size.to_string())]);
        let response = self.send_authorized(request).await?;
        Self::json(response, "file list").await
    }

    /// `GET /api/files/search?q=`
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status or a malformed body.
    pub async fn search_files(
        &self,
        query: &str,
        page: usize,
        page_size: usize,
    ) -> Result<FilePage, ApiError> {
        let request = self.client.get(self.url("/api/files/search")).query(&[
            ("q", query.to_owned()),
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ]);
        let response = self.send_authorized(request).await?;
        Self::json(response, "file search").await
    }

    /// `POST /api/files/upload` as multipart with field `file`.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status or a malformed body.
    pub async fn upload_file(&self, draft: &UploadDraft) -> Result<FileRecord, ApiError> {
        let part = Part::bytes(draft.content.clone())
            .file_name(draft.file_name.clone())
            .mime_str(&draft.mime_type)
            .map_err(|e| ApiError::InvalidResponse(format!("invalid MIME type {}: {e}", draft.mime_type)))?;
        let form = Form::new().part("file", part);
        let request = self.client.post(self.url("/api/files/upload")).multipart(form);
        let response = self.send_authorized(request).await?;
        Self::json(response, "uploaded file").await
    }

    /// `GET /api/files/:id/download`
    ///
    /// # Errors
    /// Returns an error on transport failure or non-success status.
    pub async fn download_file(&self, id: u64) -> Result<Download, ApiError> {
        let request = self.client.get(self.url(&format!("/api/files/{id}/download")));
        let response = self.send_authorized(request).await?;
        Self::download(response).await
    }

    /// `GET /api/files/:id/view`
    ///
    /// # Errors
    /// Returns an error on transport failure or non-success status.
    pub async fn view_file(&self, id: u64) -> Result<Download, ApiError> {
        let request = self.client.get(self.url(&format!("/api/files/{id}/view")));
        let response = self.send_authorized(request).await?;
        Self::download(response).await
    }

    /// `DELETE /api/files/:id`
    ///
    /// # Errors
    /// Returns an error on transport failure or non-success status.
    pub async fn delete_file(&self, id: u64) -> Result<(), ApiError> {
        let request = self.client.delete(self.url(&format!("/api/files/{id}")));
        self.send_authorized(request).await?;
        Ok(())
    }

    /// `POST /api/files/:id/share`
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidResponse`] when the server answers without a link.
    pub async fn share_file(&self, id: u64) -> Result<ShareLink, ApiError> {
        let request = self.client.post(self.url(&format!("/api/files/{id}/share")));
        let response = self.send_authorized(request).await?;
        let link: ShareLink = Self::json(response, "share link").await?;
        if link.shareable_link.trim().is_empty() {
            return Err(ApiError::InvalidResponse("Invalid share response from server.".to_owned()));
        }
        Ok(link)
    }

    /// `GET /api/shared/:shareId`, no credential attached.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status or a malformed body.
    pub async fn get_shared(&self, share_id: &str) -> Result<FileRecord, ApiError> {
        let request = self.client.get(self.url(&format!("/api/shared/{share_id}")));
        let response = self.send(request).await?;
        Self::json(response, "shared file").await
    }

    /// `GET /api/shared/:shareId/download`, no credential attached.
    ///
    /// # Errors
    /// Returns an error on transport failure or non-success status.
    pub async fn download_shared(&self, share_id: &str) -> Result<Download, ApiError> {
        let request = self.client.get(self.url(&format!("/api/shared/{share_id}/download")));
        let response = self.send(request).await?;
        Self::download(response).await
    }
}
