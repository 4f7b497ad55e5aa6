//! Paginated, searchable list kept in sync with the API.
//!
//! One controller drives both pagination strategies. In server mode the
//! source returns a single page and the total; in client mode the whole
//! collection is fetched once and filtered and sliced locally.
//!
//! Every load takes a generation number when issued. Only the most recently
//! issued load may touch state, so a slow response to an older search never
//! overwrites a newer one.

mod download;
mod mutations;
mod state;

#[cfg(test)]
mod client_mode_tests;
#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use pdfshelf_core::pagination::clamp_page;
use pdfshelf_core::{ClientConfig, PaginationMode, ValidationErrors};
use tokio::sync::Mutex;

pub use mutations::DeleteOutcome;
pub use state::{ListState, ListView};

use crate::debounce::Debouncer;
use crate::error::ServiceError;
use crate::notify::{Notifier, TracingNotifier};
use crate::objects::{ObjectStore, TempFileStore};
use crate::resource::{ListSource, PageQuery};

/// Collaborators and tuning for a [`ListController`].
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub page_size: usize,
    pub search_debounce: Duration,
    pub notifier: Arc<dyn Notifier>,
    pub objects: Arc<dyn ObjectStore>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl ListOptions {
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            page_size: config.page_size.max(1),
            search_debounce: config.search_debounce,
            notifier: Arc::new(TracingNotifier),
            objects: Arc::new(TempFileStore::new()),
        }
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    #[must_use]
    pub fn with_objects(mut self, objects: Arc<dyn ObjectStore>) -> Self {
        self.objects = objects;
        self
    }
}

/// Cheap-to-clone handle over one list's shared state.
pub struct ListController<R: ListSource> {
    inner: Arc<Inner<R>>,
}

impl<R: ListSource> Clone for ListController<R> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

struct Inner<R: ListSource> {
    resource: R,
    page_size: usize,
    notifier: Arc<dyn Notifier>,
    objects: Arc<dyn ObjectStore>,
    state: Mutex<ListState<R::Item>>,
    generation: AtomicU64,
    closed: AtomicBool,
    debouncer: Debouncer,
}

impl<R: ListSource> ListController<R> {
    #[must_use]
    pub fn new(resource: R, options: ListOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                resource,
                page_size: options.page_size.max(1),
                notifier: options.notifier,
                objects: options.objects,
                state: Mutex::new(ListState::default()),
                generation: AtomicU64::new(0),
                closed: AtomicBool::new(false),
                debouncer: Debouncer::new(options.search_debounce),
            }),
        }
    }

    #[must_use]
    pub fn resource(&self) -> &R {
        &self.inner.resource
    }

    #[must_use]
    pub fn mode(&self) -> PaginationMode {
        self.inner.resource.mode()
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.inner.page_size
    }

    pub async fn view(&self) -> ListView<R::Item> {
        self.inner.state.lock().await.view(self.mode(), self.inner.page_size)
    }

    pub async fn snapshot(&self) -> ListState<R::Item> {
        self.inner.state.lock().await.clone()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    /// Loads `page` for `search_term`.
    ///
    /// Client mode only hits the network for the first load; later loads
    /// re-filter what is held. On failure the previous items stay, the error
    /// is recorded on the state and reported to the notifier.
    pub async fn load(&self, page: usize, search_term: &str) -> Result<(), ServiceError> {
        self.run_load(page, search_term.to_owned(), false).await
    }

    /// Re-fetches the current page and term from the source.
    pub async fn refresh(&self) -> Result<(), ServiceError> {
        let (page, term) = self.position().await;
        self.run_load(page, term, true).await
    }

    /// Loads page 1 for `term` once the debounce delay passes without
    /// another search.
    pub fn search(&self, term: impl Into<String>) {
        if self.is_closed() {
            return;
        }
        let term = term.into();
        let this = self.clone();
        self.inner.debouncer.schedule(async move {
            if let Err(e) = this.load(1, &term).await {
                tracing::debug!(resource = this.label(), error = %e, "debounced search failed");
            }
        });
    }

    /// Waits for a pending debounced search to finish.
    pub async fn settle(&self) {
        self.inner.debouncer.settle().await;
    }

    /// Moves to `page`, clamped to the valid range.
    pub async fn page(&self, page: usize) -> Result<(), ServiceError> {
        let (target, term) = {
            let state = self.inner.state.lock().await;
            let last = state.total_pages(self.mode(), self.inner.page_size);
            (clamp_page(page, last), state.search_term.clone())
        };
        match self.mode() {
            PaginationMode::Server => self.run_load(target, term, true).await,
            PaginationMode::Client => self.run_load(target, term, false).await,
        }
    }

    pub async fn next_page(&self) -> Result<(), ServiceError> {
        let (current, _) = self.position().await;
        self.page(current.saturating_add(1)).await
    }

    pub async fn previous_page(&self) -> Result<(), ServiceError> {
        let (current, _) = self.position().await;
        self.page(current.saturating_sub(1)).await
    }

    /// Cancels pending searches and discards results of in-flight loads.
    ///
    /// Later loads are ignored and mutations fail with [`ServiceError::Closed`].
    pub async fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        self.inner.debouncer.cancel();
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.state.lock().await.loading = false;
        tracing::debug!(resource = self.label(), "list closed");
    }

    async fn run_load(
        &self,
        page: usize,
        search_term: String,
        force: bool,
    ) -> Result<(), ServiceError> {
        if self.is_closed() {
            tracing::debug!(resource = self.label(), "ignoring load on closed list");
            return Ok(());
        }
        let mode = self.mode();
        let size = self.inner.page_size;
        let generation = {
            let mut state = self.inner.state.lock().await;
            if mode == PaginationMode::Client && state.loaded && !force {
                // Local re-filter; a fetch still in flight stays current and
                // lands on this term and page.
                state.search_term = search_term;
                state.current_page = clamp_page(page, state.total_pages(mode, size));
                state.error = None;
                return Ok(());
            }
            if mode == PaginationMode::Client {
                state.search_term.clone_from(&search_term);
                state.current_page = page.max(1);
            }
            state.loading = true;
            self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let mut page = page.max(1);
        loop {
            let query = PageQuery { page, page_size: size, search_term: search_term.clone() };
            tracing::debug!(resource = self.label(), page, generation, "loading");
            let result = self.inner.resource.fetch(&query).await;

            let mut state = self.inner.state.lock().await;
            if !self.is_current(generation) {
                tracing::debug!(resource = self.label(), generation, "discarding stale load result");
                return Ok(());
            }
            match result {
                Ok(fetched) => {
                    state.items = fetched.items;
                    state.total_items = fetched.total;
                    state.loaded = true;
                    if mode == PaginationMode::Client {
                        // Term and page may have moved on locally while fetching.
                        page = state.current_page;
                    } else {
                        state.search_term.clone_from(&search_term);
                    }
                    let clamped = clamp_page(page, state.total_pages(mode, size));
                    if mode == PaginationMode::Server && clamped != page {
                        tracing::debug!(page, clamped, "page out of range, reloading");
                        page = clamped;
                        continue;
                    }
                    state.current_page = clamped;
                    state.loading = false;
                    state.error = None;
                    return Ok(());
                },
                Err(err) => {
                    let message = format!("Failed to load {}s: {}", self.label(), err.user_message());
                    state.loading = false;
                    state.error = Some(message.clone());
                    drop(state);
                    tracing::warn!(resource = self.label(), error = %err, "load failed");
                    self.inner.notifier.error(&message);
                    return Err(err);
                },
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        !self.is_closed() && self.inner.generation.load(Ordering::SeqCst) == generation
    }

    /// Makes in-flight loads stale before a local patch.
    fn invalidate_loads(&self, state: &mut ListState<R::Item>) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        state.loading = false;
    }

    fn ensure_open(&self) -> Result<(), ServiceError> {
        if self.is_closed() { Err(ServiceError::Closed) } else { Ok(()) }
    }

    async fn position(&self) -> (usize, String) {
        let state = self.inner.state.lock().await;
        (state.current_page, state.search_term.clone())
    }

    /// Reloads after a server-mode mutation; failures are already reported.
    async fn reload(&self, page: usize, search_term: String) {
        if let Err(e) = self.run_load(page, search_term, true).await {
            tracing::debug!(resource = self.label(), error = %e, "reload after change failed");
        }
    }

    fn label(&self) -> &'static str {
        self.inner.resource.label()
    }

    fn title(&self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
    }

    fn report_invalid(&self, errors: &ValidationErrors) {
        for error in errors.errors() {
            self.inner.notifier.error(&error.to_string());
        }
    }

    fn report_failure(&self, action: &str, err: &ServiceError) {
        let message = format!("Failed to {action} {}: {}", self.label(), err.user_message());
        tracing::warn!(resource = self.label(), action, error = %err, "operation failed");
        self.inner.notifier.error(&message);
    }
}
