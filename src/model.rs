//! File API Data Model
//!
//! Wire types exchanged with the file API. Field names follow the API's
//! camelCase JSON (`_id`, `originalName`, `mimeType`, `shareableLink`).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Display name used when a record has no original filename
pub const UNTITLED: &str = "Untitled";

/// An uploaded media asset and its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Server-side identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Filename as uploaded
    #[serde(default)]
    pub original_name: Option<String>,
    /// MIME type reported by the server
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// Storage URL used for previews
    #[serde(default)]
    pub path: String,
    /// Ordered tags, unique per record
    #[serde(default)]
    pub tags: Vec<String>,
    /// View counter maintained by the server
    #[serde(default)]
    pub views: u64,
    /// Token of the public share link, once generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable_link: Option<String>,
}

impl FileRecord {
    /// Name to show in the UI
    pub fn display_name(&self) -> &str {
        match self.original_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNTITLED,
        }
    }

    /// Preview kind derived from the MIME type
    pub fn media_kind(&self) -> MediaKind {
        MediaKind::from_mime(self.mime_type.as_deref().unwrap_or_default())
    }

    /// Human-readable size
    pub fn formatted_size(&self) -> String {
        format_file_size(self.size)
    }
}

/// How a file is previewed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Anything that is not `image/*` is treated as a video
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            MediaKind::Image
        } else {
            MediaKind::Video
        }
    }
}

/// Login request body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Registration form. Only email and password are sent to the API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Request body for `POST /api/auth/register`
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

/// Response of login and register
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

/// Body of `POST /api/files/:id/tags`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsUpdate {
    pub tags: Vec<String>,
}

/// How often a displayed file refreshes its view count
pub const VIEW_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Response of `GET /api/files/stats/:id`
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ViewStats {
    #[serde(default)]
    pub views: u64,
}

/// Error body returned by the API on failure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Prefer `message`, then `error`
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Format a byte count as "1.5 KB", "2 MB", "0 Bytes"
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
