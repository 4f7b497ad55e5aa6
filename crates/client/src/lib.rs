//! REST client for the pdfshelf API
//!
//! One [`ApiClient`] covers every endpoint: files, share links, shared access,
//! users and authentication. Bearer tokens come from a [`TokenStore`].

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

pub mod client;
pub mod error;
mod files;
mod messages;
pub mod token_store;
mod users;


pub use client::{ApiClient, Download};
pub use error::ApiError;
pub use messages::login_error_message;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
