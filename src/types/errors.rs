use thiserror::Error;

// === ApiError ===

/// Errors raised by calls to the remote downloads API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, timeout, body read).
    #[error("Downloads API network error: {0}")]
    Network(String),
    /// The service answered with a non-success status code.
    #[error("Downloads API returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body did not have the expected shape.
    #[error("Invalid downloads API response: {0}")]
    InvalidResponse(String),
    /// The client could not be constructed.
    #[error("Downloads API client error: {0}")]
    Client(String),
}

// === SettingsError ===

/// Errors related to shell settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File system I/O operation failed.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// JSON serialization or deserialization failed.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === WindowError ===

/// Errors related to the window registry.
#[derive(Debug, Error)]
pub enum WindowError {
    /// No window is registered under the given id.
    #[error("Window not found: {0}")]
    NotFound(String),
    /// The platform refused to create a window or webview.
    #[error("Window creation failed: {0}")]
    CreationFailed(String),
}
