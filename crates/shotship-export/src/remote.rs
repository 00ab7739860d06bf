//! Remote review-service boundary.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ExportResult;

/// Opaque handle to a file the remote service has accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileReference(pub String);

impl FileReference {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session with the remote review service.
///
/// Injected into the coordinator at construction so tests can substitute a
/// fake without process-wide setup. One upload call per job phase; the
/// coordinator never interleaves concurrent uploads for the same job.
#[async_trait]
pub trait RemoteDelegate: Send + Sync {
    /// Whether the session holds valid credentials. Checked once, at job
    /// start; an unauthenticated session fails the job before any work runs.
    fn is_authenticated(&self) -> bool;

    /// Upload one local file into the target project, returning the remote
    /// file reference. Blocking from the caller's perspective.
    async fn upload_file(
        &self,
        local_path: &Path,
        target_project: &str,
    ) -> ExportResult<FileReference>;
}
