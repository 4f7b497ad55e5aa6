//! Signed-in identity and its stored credential.

use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use pdfshelf_client::{ApiClient, ApiError};
use pdfshelf_core::{LoginRequest, RegistrationForm, User, ValidationErrors};
use tokio::task::JoinHandle;

use crate::error::ServiceError;

/// Shared handle to the current session.
///
/// Cloning is cheap; all clones see the same user and token.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    api: ApiClient,
    user: Mutex<Option<User>>,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        if let Some(task) = self.refresh_task.get_mut().unwrap_or_else(PoisonError::into_inner).take() {
            task.abort();
        }
    }
}

impl Session {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                api,
                user: Mutex::new(None),
                refresh_task: Mutex::new(None),
            }),
        }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Restores the session from the stored token, if any.
    pub async fn init(&self) -> Result<Option<User>, ServiceError> {
        let user = self.refresh_user().await?;
        match &user {
            Some(u) => tracing::info!(user_id = u.id, "session restored"),
            None => tracing::debug!("no stored session"),
        }
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ServiceError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.push("credentials", "Please enter both email and password");
            return Err(errors.into());
        }
        let request = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let response = self.inner.api.login(&request).await.inspect_err(|e| {
            tracing::warn!(status = ?e.status(), error = %e, "login failed");
        })?;
        self.inner.api.tokens().save(&response.token)?;
        self.set_user(Some(response.user.clone()));
        tracing::info!(user_id = response.user.id, "signed in");
        Ok(response.user)
    }

    pub async fn register(&self, form: &RegistrationForm) -> Result<(), ServiceError> {
        form.validate()?;
        self.inner.api.register(&form.to_request()).await?;
        tracing::info!("registration accepted");
        Ok(())
    }

    /// Forgets the user and clears the stored token.
    pub fn logout(&self) -> Result<(), ServiceError> {
        self.set_user(None);
        self.inner.api.tokens().clear()?;
        tracing::info!("signed out");
        Ok(())
    }

    /// Re-reads the current user.
    ///
    /// Without a stored token this returns `None` without a request. A 401 or
    /// 400 clears the token and returns `None`; other failures keep the
    /// cached user and are returned.
    pub async fn refresh_user(&self) -> Result<Option<User>, ServiceError> {
        if self.inner.api.token()?.is_none() {
            self.set_user(None);
            return Ok(None);
        }
        match self.inner.api.current_user().await {
            Ok(user) => {
                self.set_user(Some(user.clone()));
                Ok(Some(user))
            },
            Err(err @ (ApiError::Unauthorized(_) | ApiError::Rejected { code: 400, .. })) => {
                tracing::info!(error = %err, "stored credential rejected");
                self.inner.api.tokens().clear()?;
                self.set_user(None);
                Ok(None)
            },
            Err(err) => Err(err.into()),
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.inner.user.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// A token is stored and a user is cached.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let has_token = self.inner.api.token().ok().flatten().is_some();
        has_token && self.user().is_some()
    }

    /// The stored bearer token.
    ///
    /// # Errors
    /// Returns [`ServiceError::Unauthenticated`] when no token is stored.
    pub fn require_token(&self) -> Result<String, ServiceError> {
        self.inner.api.token()?.ok_or(ServiceError::Unauthenticated)
    }

    /// Re-validates the user every `interval` until [`teardown`](Self::teardown).
    ///
    /// Replaces any refresh loop already running. Must be called from within a
    /// tokio runtime.
    pub fn spawn_refresh(&self, interval: Duration) {
        let weak: Weak<SessionInner> = Arc::downgrade(&self.inner);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                let session = Self { inner };
                match session.refresh_user().await {
                    Ok(Some(_)) => tracing::debug!("session refreshed"),
                    Ok(None) => tracing::info!("session expired"),
                    Err(e) => tracing::warn!(error = %e, "session refresh failed"),
                }
            }
        });
        let previous = self.inner.refresh_task.lock().unwrap_or_else(PoisonError::into_inner).replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Stops the periodic refresh.
    pub fn teardown(&self) {
        if let Some(task) = self.inner.refresh_task.lock().unwrap_or_else(PoisonError::into_inner).take() {
            task.abort();
            tracing::debug!("session refresh stopped");
        }
    }

    fn set_user(&self, user: Option<User>) {
        *self.inner.user.lock().unwrap_or_else(PoisonError::into_inner) = user;
    }
}
