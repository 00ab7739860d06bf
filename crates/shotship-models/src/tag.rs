//! Provenance tag attached to the original item.
//!
//! The tag is the durable record of what was exported and where it went.
//! It is built fresh and fully populated for every job; nothing is ever
//! fetched back from the host's tag registry and mutated, so stale values
//! from an earlier export of the same name cannot leak into a new one.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ExportConfig;
use crate::output::ResolvedOutput;

/// Stable identifier for an attached tag, assigned by the host registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(pub String);

impl TagId {
    /// Generate a new random tag ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TagId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One provenance record per export job, all fields string-encoded.
///
/// The metadata keys emitted by [`ProvenanceTag::metadata`] are the
/// compatibility surface other tooling reads later; every key is written on
/// every build, never left to a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceTag {
    /// Tag display name, also the lookup key in the host registry
    pub name: String,
    pub path_template: String,
    pub description: String,
    pub path: String,
    pub localtime: String,
    /// Intermediate script path, only when the job keeps the script
    pub script: Option<String>,
    pub start_frame: String,
    pub duration: String,
    pub frame_offset: String,
    pub start_handle: String,
    pub end_handle: String,
    pub applied_retimes: String,
    pub upload_time: String,
}

impl ProvenanceTag {
    /// Build a fully populated tag for one job.
    ///
    /// Handle fields are written as `"0"` when the export has no handle
    /// concept (full-clip export); consumers treat that as a sentinel, so it
    /// must be written explicitly rather than omitted.
    pub fn build(config: &ExportConfig, output: &ResolvedOutput, localtime: DateTime<Utc>) -> Self {
        let timestamp = timestamp_string(localtime);
        let (start, _end) = output.frame_range;
        let (start_handle, end_handle) = config.cut_handles().output_handles();

        let script = if config.keep_intermediate_script() {
            output
                .script_path
                .as_ref()
                .map(|p| p.display().to_string())
        } else {
            None
        };

        Self {
            name: format!("Transcode {} {}", config.file_type(), timestamp),
            path_template: output.path_template.clone(),
            description: format!("Shotship upload {}", config.file_type()),
            path: output.output_path.display().to_string(),
            localtime: localtime.to_rfc3339(),
            script,
            start_frame: start.to_string(),
            duration: output.duration().to_string(),
            frame_offset: output.frame_offset().to_string(),
            start_handle: start_handle.to_string(),
            end_handle: end_handle.to_string(),
            applied_retimes: (if config.applies_retimes() { "1" } else { "0" }).to_string(),
            upload_time: timestamp,
        }
    }

    /// Flatten into the key/value form stored on the host tag. Every key is
    /// present on every call, the optional script entry aside.
    pub fn metadata(&self) -> BTreeMap<String, String> {
        let mut meta = BTreeMap::new();
        meta.insert("tag.pathtemplate".to_string(), self.path_template.clone());
        meta.insert("tag.description".to_string(), self.description.clone());
        meta.insert("tag.path".to_string(), self.path.clone());
        meta.insert("tag.localtime".to_string(), self.localtime.clone());
        if let Some(script) = &self.script {
            meta.insert("tag.script".to_string(), script.clone());
        }
        meta.insert("tag.startframe".to_string(), self.start_frame.clone());
        meta.insert("tag.duration".to_string(), self.duration.clone());
        meta.insert("tag.frameoffset".to_string(), self.frame_offset.clone());
        meta.insert("tag.starthandle".to_string(), self.start_handle.clone());
        meta.insert("tag.endhandle".to_string(), self.end_handle.clone());
        meta.insert("tag.appliedretimes".to_string(), self.applied_retimes.clone());
        meta.insert("tag.upload_time".to_string(), self.upload_time.clone());
        meta
    }
}

/// Human-readable timestamp used in tag names and the upload-time field.
pub fn timestamp_string(localtime: DateTime<Utc>) -> String {
    localtime.format("%Y-%m-%d %H:%M:%S").to_string()
}
