//! Shared data models for the Shotship export coordinator.
//!
//! This crate provides Serde-serializable types for:
//! - Export job state
//! - Job configuration (preset defaults plus per-job overrides)
//! - Source item classification
//! - Resolved render output description
//! - The provenance tag written back onto the original item

pub mod config;
pub mod output;
pub mod source;
pub mod state;
pub mod tag;

// Re-export common types
pub use config::{ConfigOverrides, CutHandles, ExportConfig, ExportPreset};
pub use output::ResolvedOutput;
pub use source::{is_video_container_ext, SourceItem};
pub use state::ExportState;
pub use tag::{ProvenanceTag, TagId};
