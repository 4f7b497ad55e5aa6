//! Core types and rules for pdfshelf
//!
//! Domain records, form validation, pagination arithmetic and configuration
//! shared by the client, service and CLI crates.

pub mod constants;
mod env_config;
mod error;
mod file;
mod item;
mod json_utils;
pub mod pagination;
mod user;
pub mod validation;

#[cfg(test)]
mod validation_tests;

pub use env_config::*;
pub use error::*;
pub use file::*;
pub use item::*;
pub use json_utils::*;
pub use pagination::PaginationMode;
pub use user::*;
pub use validation::MinimumAge;
