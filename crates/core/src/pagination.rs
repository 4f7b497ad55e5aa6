//! Page arithmetic shared by both list strategies.
//!
//! Pages are 1-indexed. A collection always has at least one page, even when
//! empty, so `current_page` can stay within `[1, total_pages]`.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Where pagination and filtering happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// The server filters, slices and reports the total; the client holds one page.
    Server,
    /// The client fetches the full collection once and filters/slices locally.
    Client,
}

/// Number of pages for `total_items`, never less than one.
#[must_use]
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_items.div_ceil(page_size).max(1)
}

/// Clamps a requested page into `[1, total_pages]`.
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Page to show after an item was removed and `remaining` items are left.
///
/// Steps back only when the current page no longer exists.
#[must_use]
pub fn page_after_delete(current_page: usize, remaining: usize, page_size: usize) -> usize {
    clamp_page(current_page, total_pages(remaining, page_size))
}

/// Index range of `page` within a collection of `len` items.
#[must_use]
pub fn page_range(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}
