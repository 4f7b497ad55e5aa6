//! Administrative user list: fetched whole, filtered and paginated locally.

use async_trait::async_trait;
use pdfshelf_core::{ListItem, PaginationMode, User, UserForm, ValidationErrors};
use serde_json::Value;

use crate::error::ServiceError;
use crate::resource::{Fetched, ItemCreator, ItemEditor, ItemRemover, ItemReorderer, ListSource, PageQuery};
use crate::session::Session;

const DUPLICATE_EMAIL: &str = "This email is already registered";

#[derive(Debug, Clone)]
pub struct UserResource {
    session: Session,
}

impl UserResource {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

fn email_taken(email: &str, existing: &[User], except: Option<u64>) -> bool {
    let email = email.trim();
    existing
        .iter()
        .filter(|user| Some(user.id) != except)
        .any(|user| user.email.eq_ignore_ascii_case(email))
}

fn validate_form(form: &UserForm, existing: &[User], except: Option<u64>) -> Result<(), ValidationErrors> {
    let mut errors = form.validate().err().unwrap_or_default();
    if !form.email.trim().is_empty() && email_taken(&form.email, existing, except) {
        errors.push("email", DUPLICATE_EMAIL);
    }
    errors.into_result()
}

#[async_trait]
impl ListSource for UserResource {
    type Item = User;

    fn label(&self) -> &'static str {
        "user"
    }

    fn mode(&self) -> PaginationMode {
        PaginationMode::Client
    }

    fn precheck(&self) -> Result<(), ServiceError> {
        self.session.require_token().map(|_| ())
    }

    async fn fetch(&self, _query: &PageQuery) -> Result<Fetched<User>, ServiceError> {
        self.session.require_token()?;
        let users = self.session.api().list_users().await?;
        tracing::debug!(count = users.len(), "users fetched");
        Ok(Fetched::all(users))
    }
}

#[async_trait]
impl ItemCreator for UserResource {
    type Draft = UserForm;

    fn validate_draft(&self, draft: &UserForm, existing: &[User]) -> Result<(), ValidationErrors> {
        validate_form(draft, existing, None)
    }

    async fn create(&self, draft: &UserForm) -> Result<Option<User>, ServiceError> {
        self.session.require_token()?;
        let payload = draft.to_payload()?;
        let body = self.session.api().create_user(&payload).await?;
        // Some servers answer with a bare `{message}`; the caller re-fetches then.
        Ok(serde_json::from_value::<User>(body).ok().filter(|user| user.id != 0))
    }
}

#[async_trait]
impl ItemEditor for UserResource {
    type Patch = UserForm;

    fn validate_patch(&self, id: u64, patch: &UserForm, existing: &[User]) -> Result<(), ValidationErrors> {
        validate_form(patch, existing, Some(id))
    }

    /// The sent fields overlaid with whatever the server echoed back.
    async fn update(&self, id: u64, patch: &UserForm) -> Result<Value, ServiceError> {
        self.session.require_token()?;
        let payload = patch.to_payload()?;
        let response = self.session.api().update_user(id, &payload).await?;
        let mut overlay = serde_json::to_value(&payload)?;
        if let (Value::Object(fields), Value::Object(echoed)) = (&mut overlay, response) {
            fields.extend(echoed);
        }
        Ok(overlay)
    }
}

#[async_trait]
impl ItemRemover for UserResource {
    async fn remove(&self, id: u64) -> Result<(), ServiceError> {
        self.session.require_token()?;
        Ok(self.session.api().delete_user(id).await?)
    }
}

#[async_trait]
impl ItemReorderer for UserResource {
    async fn reorder(&self, items: &[User]) -> Result<(), ServiceError> {
        self.session.require_token()?;
        tracing::debug!(order = ?items.iter().map(ListItem::id).collect::<Vec<_>>(), "saving user order");
        Ok(self.session.api().reorder_users(items).await?)
    }
}
