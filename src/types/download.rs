use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Fixed message sent when a download ends in the `interrupted` state.
pub const INTERRUPTED_MESSAGE: &str = "Download interrupted";

/// State tag reported by the download session alongside each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadState {
    Progressing,
    Interrupted,
    Completed,
    Cancelled,
}

/// Status of the remote tracking record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteStatus {
    InProgress,
    Completed,
    Cancelled,
    Failed,
}

/// Immutable metadata captured when a download starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadMetadata {
    pub filename: String,
    pub url: String,
    /// Size announced by the server. Zero or negative when unknown.
    pub total_bytes: i64,
    pub mime_type: String,
    pub save_path: String,
}

impl DownloadMetadata {
    /// Returns the total size if the server supplied one.
    pub fn known_total(&self) -> Option<u64> {
        known_total(self.total_bytes)
    }
}

pub(crate) fn known_total(total_bytes: i64) -> Option<u64> {
    if total_bytes > 0 {
        Some(total_bytes as u64)
    } else {
        None
    }
}

/// One event on a download session's stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadEvent {
    /// Repeated while the download is active.
    Updated { state: DownloadState, received_bytes: u64 },
    /// Delivered exactly once, last.
    Done { state: DownloadState, received_bytes: u64 },
}

/// Opaque identifier assigned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The service has shipped both string and numeric ids.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => RecordId(s),
            RawId::Unsigned(n) => RecordId(n.to_string()),
            RawId::Signed(n) => RecordId(n.to_string()),
        })
    }
}

/// Body of `POST /api/downloads`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDownloadRequest {
    pub filename: String,
    pub url: String,
    pub file_size: i64,
    pub mime_type: String,
    pub save_path: String,
}

impl From<&DownloadMetadata> for CreateDownloadRequest {
    fn from(meta: &DownloadMetadata) -> Self {
        Self {
            filename: meta.filename.clone(),
            url: meta.url.clone(),
            file_size: meta.total_bytes,
            mime_type: meta.mime_type.clone(),
            save_path: meta.save_path.clone(),
        }
    }
}

/// Response of `POST /api/downloads`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateDownloadResponse {
    pub download_id: RecordId,
}

/// Partial body of `PUT /api/downloads/{id}`. Unset fields are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateDownloadRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloaded_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RemoteStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}
