use std::sync::Arc;

use anyhow::{Result, bail};
use pdfshelf_client::{ApiClient, FileTokenStore};
use pdfshelf_core::{ClientConfig, User};
use pdfshelf_service::{AutoConfirm, Confirm, ListOptions, Notifier, ObjectStore, Session, TempFileStore};

use crate::ui::{PrintNotifier, StdinConfirm};

pub(crate) mod auth;
pub(crate) mod files;
pub(crate) mod shared;
pub(crate) mod users;

/// What every command needs: the session, the notice sink and the object store.
pub(crate) struct Context {
    pub config: ClientConfig,
    pub session: Session,
    pub notifier: Arc<dyn Notifier>,
    pub objects: Arc<dyn ObjectStore>,
    pub json: bool,
    assume_yes: bool,
}

impl Context {
    pub fn new(config: ClientConfig, assume_yes: bool, json: bool) -> Result<Self> {
        let tokens = Arc::new(FileTokenStore::new(&config.storage_dir));
        tracing::debug!(api_url = %config.api_url, storage = %tokens.path().display(), "connecting");
        let api = ApiClient::from_config(&config, tokens)?;
        Ok(Self {
            session: Session::new(api),
            notifier: Arc::new(PrintNotifier),
            objects: Arc::new(TempFileStore::new()),
            config,
            json,
            assume_yes,
        })
    }

    pub fn list_options(&self) -> ListOptions {
        ListOptions::from_config(&self.config)
            .with_notifier(Arc::clone(&self.notifier))
            .with_objects(Arc::clone(&self.objects))
    }

    pub fn confirm(&self) -> Box<dyn Confirm> {
        if self.assume_yes { Box::new(AutoConfirm(true)) } else { Box::new(StdinConfirm) }
    }

    /// Restores the stored session or fails with a hint to sign in.
    pub async fn signed_in(&self) -> Result<User> {
        match self.session.init().await? {
            Some(user) => Ok(user),
            None => bail!("Not signed in. Run `pdfshelf login` first."),
        }
    }
}
