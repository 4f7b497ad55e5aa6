//! Environment variable parsing with warn-level logging for invalid values.

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PAGE_SIZE, DEFAULT_REFRESH_INTERVAL_SECS,
    DEFAULT_SEARCH_DEBOUNCE_MS,
};

const API_URL_ENV: &str = "PDFSHELF_API_URL";
const PAGE_SIZE_ENV: &str = "PDFSHELF_PAGE_SIZE";
const DEBOUNCE_ENV: &str = "PDFSHELF_SEARCH_DEBOUNCE_MS";
const REFRESH_ENV: &str = "PDFSHELF_REFRESH_INTERVAL_SECS";
const TIMEOUT_ENV: &str = "PDFSHELF_HTTP_TIMEOUT_SECS";
const STORAGE_DIR_ENV: &str = "PDFSHELF_STORAGE_DIR";

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

/// Runtime settings shared by the client, the services and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub page_size: usize,
    pub search_debounce: Duration,
    pub refresh_interval: Duration,
    pub http_timeout: Duration,
    pub storage_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            storage_dir: default_storage_dir(),
        }
    }
}

impl ClientConfig {
    /// Reads every `PDFSHELF_*` variable, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let api_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        let mut page_size = env_parse_with_default(PAGE_SIZE_ENV, DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            tracing::warn!(var = PAGE_SIZE_ENV, "page size must be positive, using default");
            page_size = DEFAULT_PAGE_SIZE;
        }

        let storage_dir = std::env::var_os(STORAGE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_storage_dir);

        Self {
            api_url,
            page_size,
            search_debounce: Duration::from_millis(env_parse_with_default(
                DEBOUNCE_ENV,
                DEFAULT_SEARCH_DEBOUNCE_MS,
            )),
            refresh_interval: Duration::from_secs(env_parse_with_default(
                REFRESH_ENV,
                DEFAULT_REFRESH_INTERVAL_SECS,
            )),
            http_timeout: Duration::from_secs(env_parse_with_default(
                TIMEOUT_ENV,
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
            storage_dir,
        }
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("pdfshelf")
}
