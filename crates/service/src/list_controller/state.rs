use pdfshelf_core::pagination::{page_range, total_pages};
use pdfshelf_core::{ListItem, PaginationMode, filter_items};
use serde::Serialize;

/// Collection state as last fetched or locally patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState<T> {
    /// Server mode: the current page. Client mode: the whole collection.
    pub items: Vec<T>,
    pub search_term: String,
    pub current_page: usize,
    /// Server-reported total in server mode, `items.len()` in client mode.
    pub total_items: usize,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_term: String::new(),
            current_page: 1,
            total_items: 0,
            loading: false,
            loaded: false,
            error: None,
        }
    }
}

impl<T: ListItem> ListState<T> {
    /// Items the view paginates over: the server total, or the filtered count.
    #[must_use]
    pub fn visible_total(&self, mode: PaginationMode) -> usize {
        match mode {
            PaginationMode::Server => self.total_items,
            PaginationMode::Client => {
                self.items.iter().filter(|item| item.matches(&self.search_term)).count()
            },
        }
    }

    #[must_use]
    pub fn total_pages(&self, mode: PaginationMode, page_size: usize) -> usize {
        total_pages(self.visible_total(mode), page_size)
    }

    #[must_use]
    pub fn view(&self, mode: PaginationMode, page_size: usize) -> ListView<T> {
        let items = match mode {
            PaginationMode::Server => self.items.clone(),
            PaginationMode::Client => {
                let filtered = filter_items(&self.items, &self.search_term);
                let range = page_range(filtered.len(), self.current_page, page_size);
                filtered.get(range).unwrap_or_default().iter().map(|item| (*item).clone()).collect()
            },
        };
        let total_items = self.visible_total(mode);
        ListView {
            items,
            current_page: self.current_page,
            total_pages: total_pages(total_items, page_size),
            total_items,
            search_term: self.search_term.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

/// What a front end renders: one page plus pagination facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub search_term: String,
    pub loading: bool,
    pub error: Option<String>,
}
