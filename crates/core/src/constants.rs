//! Shared constants for pdfshelf.

/// Default number of items per page for both file and user lists.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Delay between the last keystroke and the search request.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// How often an active session re-validates the current user.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

/// Default HTTP timeout for API calls.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default API base URL when `PDFSHELF_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Key under which the bearer token is persisted in local storage.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// File name of the local key/value store.
pub const LOCAL_STORAGE_FILE: &str = "storage.json";

/// The only MIME type accepted for uploads.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Minimum age enforced by the registration and user-management forms.
pub const FORM_MINIMUM_AGE: i32 = 13;

/// Minimum age enforced by the standalone date-of-birth check.
///
/// Disagrees with [`FORM_MINIMUM_AGE`]. Pick one through [`crate::MinimumAge`].
pub const STRICT_MINIMUM_AGE: i32 = 16;

/// Minimum password length for registration.
pub const MIN_PASSWORD_LEN: usize = 8;
