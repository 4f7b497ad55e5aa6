use std::collections::HashSet;

use pdfshelf_core::pagination::{clamp_page, page_after_delete, total_pages};
use pdfshelf_core::{ListItem, PaginationMode, ValidationErrors, merge_record};

use super::ListController;
use crate::error::ServiceError;
use crate::notify::Confirm;
use crate::resource::{ItemCreator, ItemEditor, ItemId, ItemRemover, ItemReorderer};

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined; nothing was sent.
    Cancelled,
}

impl<R: ItemCreator> ListController<R> {
    /// Validates and creates an item, then shows the last page.
    ///
    /// Server mode reloads that page; client mode appends locally, or
    /// re-fetches when the server did not echo the new record. A search that
    /// would hide the new item is cleared first.
    pub async fn add(&self, draft: R::Draft) -> Result<(), ServiceError> {
        self.ensure_open()?;
        {
            let state = self.inner.state.lock().await;
            if let Err(errors) = self.inner.resource.validate_draft(&draft, &state.items) {
                drop(state);
                self.report_invalid(&errors);
                return Err(errors.into());
            }
        }

        let created = self.inner.resource.create(&draft).await.inspect_err(|e| self.report_failure("add", e))?;
        tracing::info!(resource = self.label(), "item added");
        self.inner.notifier.success(&format!("{} added successfully", self.title()));

        let size = self.inner.page_size;
        match (self.mode(), created) {
            (PaginationMode::Server, _) => {
                let searching = {
                    let mut state = self.inner.state.lock().await;
                    let searching = !state.search_term.is_empty();
                    if !searching {
                        state.total_items = state.total_items.saturating_add(1);
                    }
                    searching
                };
                if searching {
                    // The unfiltered total is unknown until page 1 comes back.
                    self.reload(1, String::new()).await;
                }
                let last = {
                    let mut state = self.inner.state.lock().await;
                    let last = total_pages(state.total_items, size);
                    state.current_page = last;
                    last
                };
                if !searching || last > 1 {
                    self.reload(last, String::new()).await;
                }
            },
            (PaginationMode::Client, Some(item)) => {
                let mut state = self.inner.state.lock().await;
                self.invalidate_loads(&mut state);
                if !item.matches(&state.search_term) {
                    tracing::debug!(resource = self.label(), "new item hidden by search, clearing term");
                    state.search_term.clear();
                }
                state.items.push(item);
                state.total_items = state.items.len();
                state.current_page = state.total_pages(PaginationMode::Client, size);
            },
            (PaginationMode::Client, None) => {
                self.reload(usize::MAX, String::new()).await;
            },
        }
        Ok(())
    }
}

impl<R: ItemEditor> ListController<R> {
    /// Validates and updates an item, merging the result into the local copy.
    ///
    /// Fields absent from the update keep their local value.
    pub async fn edit(&self, id: ItemId<R>, patch: R::Patch) -> Result<(), ServiceError> {
        self.ensure_open()?;
        {
            let state = self.inner.state.lock().await;
            if let Err(errors) = self.inner.resource.validate_patch(id, &patch, &state.items) {
                drop(state);
                self.report_invalid(&errors);
                return Err(errors.into());
            }
        }

        let overlay =
            self.inner.resource.update(id, &patch).await.inspect_err(|e| self.report_failure("update", e))?;

        let mut state = self.inner.state.lock().await;
        self.invalidate_loads(&mut state);
        if let Some(slot) = state.items.iter_mut().find(|item| item.id() == id) {
            *slot = merge_record(&*slot, overlay)?;
        } else {
            tracing::debug!(resource = self.label(), %id, "updated item not held locally");
        }
        let last = state.total_pages(self.mode(), self.inner.page_size);
        state.current_page = clamp_page(state.current_page, last);
        drop(state);

        tracing::info!(resource = self.label(), %id, "item updated");
        self.inner.notifier.success(&format!("{} updated successfully", self.title()));
        Ok(())
    }
}

impl<R: ItemRemover> ListController<R> {
    /// Deletes an item after confirmation.
    ///
    /// State changes only after the server confirms. The current page steps
    /// back when it no longer exists.
    pub async fn delete(&self, id: ItemId<R>, confirm: &dyn Confirm) -> Result<DeleteOutcome, ServiceError> {
        self.ensure_open()?;
        self.inner.resource.precheck().inspect_err(|e| self.report_failure("delete", e))?;
        let prompt = format!("Are you sure you want to delete this {}?", self.label());
        if !confirm.confirm(&prompt).await {
            tracing::debug!(resource = self.label(), %id, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.inner.resource.remove(id).await.inspect_err(|e| self.report_failure("delete", e))?;
        tracing::info!(resource = self.label(), %id, "item deleted");
        self.inner.notifier.success(&format!("{} deleted successfully", self.title()));

        let size = self.inner.page_size;
        match self.mode() {
            PaginationMode::Server => {
                let (page, term) = {
                    let mut state = self.inner.state.lock().await;
                    state.total_items = state.total_items.saturating_sub(1);
                    let page = page_after_delete(state.current_page, state.total_items, size);
                    state.current_page = page;
                    (page, state.search_term.clone())
                };
                self.reload(page, term).await;
            },
            PaginationMode::Client => {
                let mut state = self.inner.state.lock().await;
                self.invalidate_loads(&mut state);
                state.items.retain(|item| item.id() != id);
                state.total_items = state.items.len();
                let remaining = state.visible_total(PaginationMode::Client);
                state.current_page = page_after_delete(state.current_page, remaining, size);
            },
        }
        Ok(DeleteOutcome::Deleted)
    }
}

impl<R: ItemReorderer> ListController<R> {
    /// Persists a new order of the full collection and adopts it locally
    /// once the server accepts it.
    pub async fn reorder(&self, order: Vec<R::Item>) -> Result<(), ServiceError> {
        self.ensure_open()?;
        {
            let state = self.inner.state.lock().await;
            if !is_permutation(&state.items, &order) {
                drop(state);
                let mut errors = ValidationErrors::new();
                errors.push("order", format!("New order must contain every {} exactly once", self.label()));
                self.report_invalid(&errors);
                return Err(errors.into());
            }
        }

        self.inner.resource.reorder(&order).await.inspect_err(|e| self.report_failure("reorder", e))?;

        let mut state = self.inner.state.lock().await;
        self.invalidate_loads(&mut state);
        state.items = order;
        state.total_items = state.items.len();
        let last = state.total_pages(self.mode(), self.inner.page_size);
        state.current_page = clamp_page(state.current_page, last);
        drop(state);

        tracing::info!(resource = self.label(), "order saved");
        self.inner.notifier.success(&format!("{} order updated", self.title()));
        Ok(())
    }

    /// Moves one item to a 1-based `position` in the full collection.
    pub async fn move_item(&self, id: ItemId<R>, position: usize) -> Result<(), ServiceError> {
        let mut order = self.inner.state.lock().await.items.clone();
        let Some(from) = order.iter().position(|item| item.id() == id) else {
            let mut errors = ValidationErrors::new();
            errors.push("id", format!("No {} with id {id}", self.label()));
            return Err(errors.into());
        };
        let item = order.remove(from);
        let to = position.saturating_sub(1).min(order.len());
        order.insert(to, item);
        self.reorder(order).await
    }
}

fn is_permutation<T: ListItem>(current: &[T], order: &[T]) -> bool {
    if current.len() != order.len() {
        return false;
    }
    let held: HashSet<T::Id> = current.iter().map(ListItem::id).collect();
    let mut seen = HashSet::with_capacity(order.len());
    order.iter().all(|item| held.contains(&item.id()) && seen.insert(item.id()))
}
