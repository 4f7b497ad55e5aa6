use std::sync::Arc;
use std::time::Duration;

use pdfshelf_core::ClientConfig;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::token_store::TokenStore;

/// Longest body excerpt kept in decode errors.
const BODY_EXCERPT_LEN: usize = 200;

/// Client for the pdfshelf REST API.
///
/// Attaches `Authorization: Bearer <token>` from the [`TokenStore`] whenever a
/// token is stored, and clears the stored token on any 401 from an
/// authenticated request.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("client", &self.client)
            .field("base_url", &self.base_url)
            .field("tokens", &"***")
            .finish()
    }
}

/// A binary body together with what the server said about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// From `Content-Disposition: ...; filename="..."`.
    pub file_name: Option<String>,
}

impl ApiClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::ClientInit(e.to_string()))?;
        Ok(Self { client, base_url, tokens })
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        Self::new(config.api_url.clone(), config.http_timeout, tokens)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Currently stored bearer token.
    ///
    /// # Errors
    /// Returns [`ApiError::Storage`] when the token store cannot be read.
    pub fn token(&self) -> Result<Option<String>, ApiError> {
        self.tokens.load()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends an authenticated request and checks its status.
    pub(crate) async fn send_authorized(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let builder = match self.tokens.load()? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        match self.send(builder).await {
            Err(err) if err.is_auth() => {
                tracing::info!("server rejected credential, clearing stored token");
                if let Err(e) = self.tokens.clear() {
                    tracing::warn!(error = %e, "failed to clear stored token");
                }
                Err(err)
            },
            other => other,
        }
    }

    /// Sends a request and maps non-success statuses to [`ApiError`].
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), &body);
        tracing::debug!(status = status.as_u16(), error = %err, "API request failed");
        Err(err)
    }

    pub(crate) async fn json<T: DeserializeOwned>(
        response: Response,
        context: &str,
    ) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            context: format!("{context} (body: {})", truncate(&body, BODY_EXCERPT_LEN)),
            source: e,
        })
    }

    pub(crate) async fn download(response: Response) -> Result<Download, ApiError> {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition_file_name);
        let bytes = response.bytes().await?.to_vec();
        Ok(Download { bytes, content_type, file_name })
    }
}

/// Extracts `filename` from a `Content-Disposition` header value.
pub(crate) fn disposition_file_name(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_owned())
        .filter(|name| !name.is_empty())
}

pub(crate) fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    }
}
