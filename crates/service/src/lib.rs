//! Service layer for pdfshelf
//!
//! Sits between a front end and the REST client: the session gate, the
//! paginated list controller for files and users, share links and downloads.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod debounce;
mod error;
mod files;
mod list_controller;
mod notify;
mod objects;
pub mod resource;
mod session;
mod shared;
mod users;


pub use debounce::Debouncer;
pub use error::ServiceError;
pub use files::FileResource;
pub use list_controller::{DeleteOutcome, ListController, ListOptions, ListState, ListView};
pub use notify::{AutoConfirm, Confirm, Notifier, TracingNotifier};
pub use objects::{DirectorySink, ObjectHandle, ObjectStore, SaveSink, TempFileStore};
pub use session::Session;
pub use shared::SharedFiles;
pub use users::UserResource;

/// Controller over the signed-in user's files.
pub type FileList = ListController<FileResource>;
/// Controller over all users.
pub type UserList = ListController<UserResource>;
