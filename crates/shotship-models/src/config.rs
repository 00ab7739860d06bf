//! Export job configuration.
//!
//! A job's configuration is resolved once at construction: preset defaults
//! overlaid by explicit per-job overrides. The coordinator only ever sees the
//! resolved, immutable [`ExportConfig`] snapshot.

use serde::{Deserialize, Serialize};

/// Cut-handle selection for an export.
///
/// `None` means the whole clip is exported and no handle concept applies at
/// all; downstream consumers treat zero-valued handles as that sentinel. It
/// is distinct from `Frames { start: 0, end: 0 }`, which means handles were
/// requested with zero size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CutHandles {
    /// Full-clip export, no handles
    #[default]
    None,
    /// Explicit handle sizes in frames
    Frames { start: u32, end: u32 },
}

impl CutHandles {
    /// Handle sizes as written into the provenance record. `(0, 0)` for
    /// the full-clip case.
    pub fn output_handles(&self) -> (u32, u32) {
        match self {
            CutHandles::None => (0, 0),
            CutHandles::Frames { start, end } => (*start, *end),
        }
    }

    /// True when the export is clipped to handles rather than full-length.
    pub fn is_clipped(&self) -> bool {
        !matches!(self, CutHandles::None)
    }
}

/// Preset defaults for an export destination.
///
/// Presets are persisted host-side; this is the subset of properties the
/// coordinator recognizes, with the defaults applied when a property is
/// unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPreset {
    /// Preset display name
    pub name: String,
    /// Output container/codec family
    pub file_type: String,
    /// Remote collection uploads land in
    pub target_project: String,
    /// Keep the generated transcode script after the render
    pub keep_intermediate_script: bool,
    /// Inject additional processing nodes into the render graph
    pub additional_nodes_enabled: bool,
}

impl ExportPreset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_type: "mov".to_string(),
            target_project: "NukeStudio".to_string(),
            keep_intermediate_script: false,
            additional_nodes_enabled: false,
        }
    }
}

impl Default for ExportPreset {
    fn default() -> Self {
        Self::new("Shotship Upload")
    }
}

/// Per-job property overrides layered on top of a preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOverrides {
    pub file_type: Option<String>,
    pub target_project: Option<String>,
    pub keep_intermediate_script: Option<bool>,
    pub cut_handles: Option<CutHandles>,
    pub retime_enabled: Option<bool>,
}

/// Resolved, immutable view of the export options for one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    file_type: String,
    target_project: String,
    keep_intermediate_script: bool,
    cut_handles: CutHandles,
    retime_enabled: bool,
    additional_nodes_enabled: bool,
}

impl ExportConfig {
    /// Resolve a config from preset defaults plus per-job overrides.
    pub fn resolve(preset: &ExportPreset, overrides: ConfigOverrides) -> Self {
        Self {
            file_type: overrides.file_type.unwrap_or_else(|| preset.file_type.clone()),
            target_project: overrides
                .target_project
                .unwrap_or_else(|| preset.target_project.clone()),
            keep_intermediate_script: overrides
                .keep_intermediate_script
                .unwrap_or(preset.keep_intermediate_script),
            cut_handles: overrides.cut_handles.unwrap_or_default(),
            retime_enabled: overrides.retime_enabled.unwrap_or(false),
            additional_nodes_enabled: preset.additional_nodes_enabled,
        }
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    pub fn target_project(&self) -> &str {
        &self.target_project
    }

    pub fn keep_intermediate_script(&self) -> bool {
        self.keep_intermediate_script
    }

    pub fn cut_handles(&self) -> CutHandles {
        self.cut_handles
    }

    pub fn retime_enabled(&self) -> bool {
        self.retime_enabled
    }

    pub fn additional_nodes_enabled(&self) -> bool {
        self.additional_nodes_enabled
    }

    /// Whether retimes are actually applied in this export. Retimes never
    /// apply to a full, unhandled export whatever `retime_enabled` says.
    pub fn applies_retimes(&self) -> bool {
        self.retime_enabled && self.cut_handles.is_clipped()
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::resolve(&ExportPreset::default(), ConfigOverrides::default())
    }
}
