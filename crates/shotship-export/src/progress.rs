//! Phase-to-overall progress mapping.
//!
//! A two-phase job reports transcode progress on `[0, 0.5]` and upload
//! progress on `[0.5, 1.0]`. An upload-only job has no stepwise feedback for
//! its single atomic call, so it shows [`UPLOAD_START_MARK`] transiently and
//! jumps to `1.0` when the call returns. Terminal states short-circuit to
//! `1.0` in the coordinator regardless of what the subsystems last reported.

/// Overall progress shown while an upload is in flight with no finer
/// feedback available.
pub const UPLOAD_START_MARK: f64 = 0.5;

/// Map transcode-phase progress onto the overall range.
pub fn transcode_phase(progress: f64) -> f64 {
    progress.clamp(0.0, 1.0) * 0.5
}

/// Map upload-phase progress onto the overall range.
pub fn upload_phase(progress: f64) -> f64 {
    0.5 + progress.clamp(0.0, 1.0) * 0.5
}
