//! Per-job export coordination for Shotship.
//!
//! An [`ExportJob`] carries one media item through up to two phases, a local
//! transcode and an upload to the remote review service, behind a single
//! start/step/progress/abort/finish surface the host drives cooperatively.
//! The transcode engine, the upload transport and the host item model are
//! all injected behind traits; this crate owns only the coordination
//! contract between them.

pub mod coordinator;
pub mod error;
pub mod host;
pub mod progress;
pub mod remote;
pub mod transcode;

// Re-export the host-facing surface
pub use coordinator::ExportJob;
pub use error::{ExportError, ExportResult};
pub use host::TagStore;
pub use remote::{FileReference, RemoteDelegate};
pub use transcode::TranscodeTask;
