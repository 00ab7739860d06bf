//! Transcode subsystem boundary.

use async_trait::async_trait;

use crate::error::ExportResult;

/// Contract the transcode subsystem satisfies.
///
/// The real implementation writes a render script, launches the render
/// process and parses its per-frame progress output; the coordinator treats
/// all of that as a black box driven through this trait. The upload-only
/// path never touches it.
#[async_trait]
pub trait TranscodeTask: Send {
    /// Begin the transcode: write the script and launch the process.
    async fn start(&mut self) -> ExportResult<()>;

    /// Advance one increment of work (typically one progress-parse pass).
    async fn step(&mut self) -> ExportResult<()>;

    /// Internal progress in `[0, 1]`.
    fn progress(&self) -> f64;

    /// Whether the render has completed.
    fn is_complete(&self) -> bool;

    /// Request cancellation (process termination). Must not block waiting
    /// for the process to exit.
    async fn abort(&mut self);

    /// Release resources held by the render, such as the open log handle.
    fn finish(&mut self);
}
