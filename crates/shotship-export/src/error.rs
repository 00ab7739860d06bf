//! Error types for export coordination.

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while coordinating an export job.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Please log in to the review service before exporting")]
    AuthenticationRequired,

    #[error("Transcode failed: {0}")]
    Transcode(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Failed to write provenance tag: {0}")]
    TagWrite(String),

    #[error("Export cancelled")]
    Cancelled,
}

impl ExportError {
    /// Create a transcode failure error.
    pub fn transcode(message: impl Into<String>) -> Self {
        Self::Transcode(message.into())
    }

    /// Create an upload failure error.
    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload(message.into())
    }

    /// Create a tag write failure error.
    pub fn tag_write(message: impl Into<String>) -> Self {
        Self::TagWrite(message.into())
    }
}
