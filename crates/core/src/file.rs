use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::PDF_MIME_TYPE;
use crate::error::ValidationErrors;

/// A stored PDF owned by the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: u64,
    #[serde(default)]
    pub user_id: u64,
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub shareable_id: String,
    #[serde(default)]
    pub content_type: String,
}

/// One page of files as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<FileRecord>,
    #[serde(default)]
    pub total: u64,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<FileRecord>, D::Error> {
    Ok(Option::<Vec<FileRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response to a share request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    #[serde(default)]
    pub shareable_id: String,
    #[serde(default)]
    pub shareable_link: String,
}

/// A PDF picked for upload, not yet sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDraft {
    pub file_name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl UploadDraft {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), mime_type: mime_type.into(), content }
    }

    /// Builds a draft from a local file name, guessing the MIME type from the extension.
    pub fn from_path_name(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = if file_name.to_ascii_lowercase().ends_with(".pdf") {
            PDF_MIME_TYPE
        } else {
            "application/octet-stream"
        };
        Self::new(file_name, mime_type, content)
    }

    /// Only non-empty PDFs are accepted.
    ///
    /// # Errors
    /// Returns the failed checks keyed by `file`.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.file_name.trim().is_empty() {
            errors.push("file", "File name is required");
        }
        if self.mime_type != PDF_MIME_TYPE {
            errors.push("file", "Please upload a PDF file");
        }
        if self.content.is_empty() {
            errors.push("file", "File is empty");
        }
        errors.into_result()
    }
}

/// Human-readable size, e.g. `1.5 KB`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}
