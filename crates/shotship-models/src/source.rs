//! Source item classification.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Container extensions that can be uploaded as-is, without a transcode
/// pass. Matched case-insensitively against the file extension.
pub const VIDEO_CONTAINER_EXTS: &[&str] = &["mov", "mp4", "m4v"];

/// Check whether an extension (without the dot) names a known video
/// container.
pub fn is_video_container_ext(ext: &str) -> bool {
    VIDEO_CONTAINER_EXTS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
}

/// Check whether a path ends in a known video-container extension.
pub fn is_video_container_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(is_video_container_ext)
        .unwrap_or(false)
}

/// The media item an export job was created for.
///
/// The host owns the real item; this is the classification the coordinator
/// needs to pick a phase plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SourceItem {
    /// A single clip backed by one media file
    Clip { media_path: PathBuf },
    /// A sequence (or anything else that must be rendered first)
    Sequence { name: String },
}

impl SourceItem {
    /// The on-disk file to upload directly, if the item is a clip whose
    /// container needs no re-encode. `None` means a transcode phase is
    /// required.
    pub fn direct_upload_path(&self) -> Option<&Path> {
        match self {
            SourceItem::Clip { media_path } if is_video_container_path(media_path) => {
                Some(media_path)
            }
            _ => None,
        }
    }

    /// Display label for logging.
    pub fn label(&self) -> String {
        match self {
            SourceItem::Clip { media_path } => media_path.display().to_string(),
            SourceItem::Sequence { name } => name.clone(),
        }
    }
}
