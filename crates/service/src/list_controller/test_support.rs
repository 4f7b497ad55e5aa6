//! Fakes shared by the list controller tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use pdfshelf_client::{ApiError, Download};
use pdfshelf_core::{FileRecord, PaginationMode, UploadDraft, User, UserForm, ValidationErrors};
use serde_json::Value;

use crate::error::ServiceError;
use crate::notify::{Confirm, Notifier};
use crate::objects::{ObjectHandle, ObjectStore, SaveSink};
use crate::resource::{
    Fetched, ItemCreator, ItemDownloader, ItemEditor, ItemRemover, ItemReorderer, ListSource,
    PageQuery,
};
use crate::{ListController, ListOptions};

#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    pub successes: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_owned());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_owned());
    }
}

/// Answers every prompt the same way and counts how often it was asked.
#[derive(Debug, Default)]
pub(crate) struct CountingConfirm {
    pub answer: bool,
    pub asked: AtomicUsize,
}

#[async_trait]
impl Confirm for CountingConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

/// Counts releases instead of touching the filesystem.
#[derive(Debug, Default)]
pub(crate) struct CountingStore {
    pub created: AtomicUsize,
    pub released: AtomicUsize,
}

impl ObjectStore for CountingStore {
    fn materialize(&self, _bytes: &[u8], _content_type: Option<&str>) -> Result<PathBuf, ServiceError> {
        let n = self.created.fetch_add(1, Ordering::SeqCst);
        Ok(PathBuf::from(format!("mem://object/{n}")))
    }

    fn release(&self, _location: &Path) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Records the requested name, optionally failing.
#[derive(Debug, Default)]
pub(crate) struct FakeSink {
    pub fail: bool,
    pub saved_as: Mutex<Vec<String>>,
}

#[async_trait]
impl SaveSink for FakeSink {
    async fn save_as(&self, object: &ObjectHandle, file_name: &str) -> Result<PathBuf, ServiceError> {
        self.saved_as.lock().unwrap().push(file_name.to_owned());
        if self.fail {
            return Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "save dialog failed").into());
        }
        Ok(object.location().join(file_name))
    }
}

pub(crate) fn file(id: u64, name: &str) -> FileRecord {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    FileRecord {
        id,
        user_id: 1,
        name: name.to_owned(),
        mime_type: "application/pdf".to_owned(),
        size: 100,
        created_at: at,
        updated_at: at,
        shareable_id: String::new(),
        content_type: "application/pdf".to_owned(),
    }
}

pub(crate) fn user(id: u64, first: &str) -> User {
    User {
        id,
        email: format!("{}@example.com", first.to_lowercase()),
        first_name: first.to_owned(),
        surname: "Doe".to_owned(),
        dob: Utc.with_ymd_and_hms(1990, 4, 21, 0, 0, 0).single(),
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn form(first: &str, email: &str) -> UserForm {
    UserForm {
        first_name: first.to_owned(),
        surname: "Doe".to_owned(),
        email: email.to_owned(),
        dob: "1990-04-21".to_owned(),
    }
}

fn unavailable() -> ServiceError {
    ApiError::from_status(503, r#"{"message":"Service unavailable"}"#).into()
}

/// Server-paginated file source backed by a vector.
#[derive(Debug, Default)]
pub(crate) struct FakeFiles {
    pub server: Mutex<Vec<FileRecord>>,
    pub fetches: Mutex<Vec<PageQuery>>,
    pub delays: Mutex<HashMap<String, Duration>>,
    pub fail_fetch: AtomicBool,
    pub fail_remove: AtomicBool,
    pub signed_out: AtomicBool,
    pub next_id: AtomicUsize,
}

impl FakeFiles {
    pub fn with_files(count: u64) -> Self {
        let files = (1..=count).map(|id| file(id, &format!("doc-{id:02}.pdf"))).collect();
        Self {
            server: Mutex::new(files),
            next_id: AtomicUsize::new(usize::try_from(count).unwrap() + 1),
            ..Self::default()
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }
}

#[async_trait]
impl ListSource for Arc<FakeFiles> {
    type Item = FileRecord;

    fn label(&self) -> &'static str {
        "file"
    }

    fn mode(&self) -> PaginationMode {
        PaginationMode::Server
    }

    fn precheck(&self) -> Result<(), ServiceError> {
        if self.signed_out.load(Ordering::SeqCst) {
            return Err(ServiceError::Unauthenticated);
        }
        Ok(())
    }

    async fn fetch(&self, query: &PageQuery) -> Result<Fetched<FileRecord>, ServiceError> {
        self.fetches.lock().unwrap().push(query.clone());
        let delay = self.delays.lock().unwrap().get(&query.search_term).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let server = self.server.lock().unwrap();
        let matching: Vec<FileRecord> =
            server.iter().filter(|f| f.name.contains(&query.search_term)).cloned().collect();
        let start = (query.page - 1) * query.page_size;
        let items = matching.iter().skip(start).take(query.page_size).cloned().collect();
        Ok(Fetched { items, total: matching.len() })
    }
}

#[async_trait]
impl ItemCreator for Arc<FakeFiles> {
    type Draft = UploadDraft;

    fn validate_draft(&self, draft: &UploadDraft, _existing: &[FileRecord]) -> Result<(), ValidationErrors> {
        draft.validate()
    }

    async fn create(&self, draft: &UploadDraft) -> Result<Option<FileRecord>, ServiceError> {
        let id = u64::try_from(self.next_id.fetch_add(1, Ordering::SeqCst)).unwrap();
        let record = file(id, &draft.file_name);
        self.server.lock().unwrap().push(record.clone());
        Ok(Some(record))
    }
}

#[async_trait]
impl ItemRemover for Arc<FakeFiles> {
    async fn remove(&self, id: u64) -> Result<(), ServiceError> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.server.lock().unwrap().retain(|f| f.id != id);
        Ok(())
    }
}

#[async_trait]
impl ItemDownloader for Arc<FakeFiles> {
    async fn fetch_content(&self, id: u64) -> Result<Download, ServiceError> {
        if self.server.lock().unwrap().iter().all(|f| f.id != id) {
            return Err(ApiError::from_status(404, r#"{"message":"File not found"}"#).into());
        }
        Ok(Download { bytes: b"%PDF-1.7".to_vec(), content_type: Some("application/pdf".to_owned()), file_name: None })
    }

    fn file_name(&self, item: &FileRecord) -> String {
        item.name.clone()
    }
}

/// Client-paginated user source.
#[derive(Debug, Default)]
pub(crate) struct FakeUsers {
    pub server: Mutex<Vec<User>>,
    pub fetches: AtomicUsize,
    pub creates: AtomicUsize,
    pub reorders: Mutex<Vec<Vec<u64>>>,
    /// When false, create answers with a bare message like some servers do.
    pub echo_created: AtomicBool,
    pub fail_mutations: AtomicBool,
    /// Applied after the collection is read, so a slow fetch returns what was there when it started.
    pub fetch_delay: Mutex<Option<Duration>>,
}

impl FakeUsers {
    pub fn with_users(names: &[&str]) -> Self {
        let users = names.iter().zip(1..).map(|(name, id)| user(id, name)).collect();
        Self { server: Mutex::new(users), echo_created: AtomicBool::new(true), ..Self::default() }
    }

    fn check_fail(&self) -> Result<(), ServiceError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl ListSource for Arc<FakeUsers> {
    type Item = User;

    fn label(&self) -> &'static str {
        "user"
    }

    fn mode(&self) -> PaginationMode {
        PaginationMode::Client
    }

    async fn fetch(&self, _query: &PageQuery) -> Result<Fetched<User>, ServiceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.server.lock().unwrap().clone();
        let delay = *self.fetch_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(Fetched::all(snapshot))
    }
}

#[async_trait]
impl ItemCreator for Arc<FakeUsers> {
    type Draft = UserForm;

    fn validate_draft(&self, draft: &UserForm, existing: &[User]) -> Result<(), ValidationErrors> {
        let mut errors = draft.validate().err().unwrap_or_default();
        if existing.iter().any(|u| u.email == draft.email) {
            errors.push("email", "This email is already registered");
        }
        errors.into_result()
    }

    async fn create(&self, draft: &UserForm) -> Result<Option<User>, ServiceError> {
        self.check_fail()?;
        self.creates.fetch_add(1, Ordering::SeqCst);
        let mut server = self.server.lock().unwrap();
        let id = server.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let mut created = user(id, &draft.first_name);
        created.email.clone_from(&draft.email);
        server.push(created.clone());
        Ok(self.echo_created.load(Ordering::SeqCst).then_some(created))
    }
}

#[async_trait]
impl ItemEditor for Arc<FakeUsers> {
    type Patch = Value;

    fn validate_patch(&self, _id: u64, _patch: &Value, _existing: &[User]) -> Result<(), ValidationErrors> {
        Ok(())
    }

    async fn update(&self, _id: u64, patch: &Value) -> Result<Value, ServiceError> {
        self.check_fail()?;
        Ok(patch.clone())
    }
}

#[async_trait]
impl ItemRemover for Arc<FakeUsers> {
    async fn remove(&self, id: u64) -> Result<(), ServiceError> {
        self.check_fail()?;
        self.server.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }
}

#[async_trait]
impl ItemReorderer for Arc<FakeUsers> {
    async fn reorder(&self, items: &[User]) -> Result<(), ServiceError> {
        self.check_fail()?;
        self.reorders.lock().unwrap().push(items.iter().map(|u| u.id).collect());
        *self.server.lock().unwrap() = items.to_vec();
        Ok(())
    }
}

pub(crate) struct Harness<S> {
    pub source: Arc<S>,
    pub notifier: Arc<RecordingNotifier>,
    pub objects: Arc<CountingStore>,
}

pub(crate) fn controller<S>(source: S) -> (ListController<Arc<S>>, Harness<S>)
where
    Arc<S>: ListSource,
{
    let source = Arc::new(source);
    let notifier = Arc::new(RecordingNotifier::default());
    let objects = Arc::new(CountingStore::default());
    let options = ListOptions {
        page_size: 5,
        search_debounce: Duration::from_millis(300),
        notifier: Arc::clone(&notifier) as Arc<dyn Notifier>,
        objects: Arc::clone(&objects) as Arc<dyn ObjectStore>,
    };
    let list = ListController::new(Arc::clone(&source), options);
    (list, Harness { source, notifier, objects })
}
