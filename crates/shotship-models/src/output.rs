//! Resolved render output description.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Per-job resolved description of what the render writes and where.
///
/// Assembled host-side when the export structure is resolved, before the job
/// is constructed; immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedOutput {
    /// Unresolved export-path template (with tokens)
    pub path_template: String,
    /// Fully resolved output path
    pub output_path: PathBuf,
    /// Output frame range, inclusive on both ends
    pub frame_range: (i64, i64),
    /// Global start-frame offset, when the job renumbers frames
    pub start_frame: Option<i64>,
    /// Path of the generated transcode script, when one is written
    pub script_path: Option<PathBuf>,
}

impl ResolvedOutput {
    /// Output duration in frames.
    pub fn duration(&self) -> i64 {
        let (start, end) = self.frame_range;
        end - start + 1
    }

    /// Frame offset recorded on the provenance tag. Movie containers are
    /// self-contained, so the offset only matters for frame sequences.
    pub fn frame_offset(&self) -> i64 {
        if crate::source::is_video_container_path(&self.output_path) {
            0
        } else {
            self.start_frame.unwrap_or(0)
        }
    }
}
