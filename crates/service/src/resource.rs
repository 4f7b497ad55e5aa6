//! Capabilities a list resource can offer.
//!
//! [`ListController`](crate::ListController) exposes an operation only when
//! its resource implements the matching trait.

use async_trait::async_trait;
use pdfshelf_client::Download;
use pdfshelf_core::{ListItem, PaginationMode, ValidationErrors};
use serde_json::Value;

use crate::error::ServiceError;

/// Identifier type of a resource's items.
pub type ItemId<R> = <<R as ListSource>::Item as ListItem>::Id;

/// What a load asks the source for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: usize,
    pub page_size: usize,
    pub search_term: String,
}

/// Items returned by a source together with the total it reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Fetched<T> {
    /// The whole collection, as a client-mode source returns it.
    #[must_use]
    pub fn all(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    type Item: ListItem;

    /// Singular noun used in notices, e.g. `file`.
    fn label(&self) -> &'static str;

    fn mode(&self) -> PaginationMode;

    /// Checks that run before the user is asked to confirm anything, such as
    /// whether a credential is stored.
    fn precheck(&self) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Server mode returns one page and the server total; client mode returns
    /// every item and ignores the query.
    async fn fetch(&self, query: &PageQuery) -> Result<Fetched<Self::Item>, ServiceError>;
}

#[async_trait]
pub trait ItemCreator: ListSource {
    type Draft: Send + Sync;

    /// Local checks against the draft and the items already held.
    fn validate_draft(&self, draft: &Self::Draft, existing: &[Self::Item]) -> Result<(), ValidationErrors>;

    /// Returns the created record when the server echoes a usable one.
    async fn create(&self, draft: &Self::Draft) -> Result<Option<Self::Item>, ServiceError>;
}

#[async_trait]
pub trait ItemEditor: ListSource {
    type Patch: Send + Sync;

    fn validate_patch(
        &self,
        id: <Self::Item as ListItem>::Id,
        patch: &Self::Patch,
        existing: &[Self::Item],
    ) -> Result<(), ValidationErrors>;

    /// Returns the JSON fields to overlay onto the local record.
    async fn update(&self, id: <Self::Item as ListItem>::Id, patch: &Self::Patch) -> Result<Value, ServiceError>;
}

#[async_trait]
pub trait ItemRemover: ListSource {
    async fn remove(&self, id: <Self::Item as ListItem>::Id) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait ItemReorderer: ListSource {
    /// Persists the full new order.
    async fn reorder(&self, items: &[Self::Item]) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait ItemDownloader: ListSource {
    async fn fetch_content(&self, id: <Self::Item as ListItem>::Id) -> Result<Download, ServiceError>;

    /// Name to save an item's content under when the server gives none.
    fn file_name(&self, item: &Self::Item) -> String;
}
