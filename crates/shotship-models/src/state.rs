//! Export job state.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an export job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExportState {
    /// Job constructed, not yet started
    #[default]
    Created,
    /// Remote session was not authenticated at start
    AuthFailed,
    /// Source is an already-encoded movie, single upload call in flight
    UploadOnly,
    /// Transcode subsystem is running
    Transcoding,
    /// Transcode complete, upload in flight
    Uploading,
    /// Upload returned a file reference
    Finished,
    /// Externally cancelled
    Aborted,
    /// A subsystem reported an unrecoverable failure
    Errored,
}

impl ExportState {
    /// Get string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportState::Created => "created",
            ExportState::AuthFailed => "auth_failed",
            ExportState::UploadOnly => "upload_only",
            ExportState::Transcoding => "transcoding",
            ExportState::Uploading => "uploading",
            ExportState::Finished => "finished",
            ExportState::Aborted => "aborted",
            ExportState::Errored => "errored",
        }
    }

    /// Check if this is a terminal state (no more transitions expected).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExportState::AuthFailed
                | ExportState::Finished
                | ExportState::Aborted
                | ExportState::Errored
        )
    }
}

impl std::fmt::Display for ExportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!ExportState::Created.is_terminal());
        assert!(!ExportState::UploadOnly.is_terminal());
        assert!(!ExportState::Transcoding.is_terminal());
        assert!(!ExportState::Uploading.is_terminal());
        assert!(ExportState::AuthFailed.is_terminal());
        assert!(ExportState::Finished.is_terminal());
        assert!(ExportState::Aborted.is_terminal());
        assert!(ExportState::Errored.is_terminal());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_string(&ExportState::AuthFailed).unwrap();
        assert_eq!(json, "\"auth_failed\"");
        let back: ExportState = serde_json::from_str("\"upload_only\"").unwrap();
        assert_eq!(back, ExportState::UploadOnly);
    }
}
