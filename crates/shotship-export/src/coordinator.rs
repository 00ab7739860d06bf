//! The per-job export coordinator.
//!
//! One [`ExportJob`] coordinates a single export through its conditional
//! phases: an authentication gate, an optional transcode, and the upload.
//! The host drives it cooperatively: `pre_update_item` on the coordination
//! thread, then `start` once, then `step` until `progress` reaches `1.0`,
//! then `finish`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use shotship_models::{ExportConfig, ExportState, ProvenanceTag, ResolvedOutput, SourceItem, TagId};

use crate::error::{ExportError, ExportResult};
use crate::host::TagStore;
use crate::progress;
use crate::remote::{FileReference, RemoteDelegate};
use crate::transcode::TranscodeTask;

/// State machine coordinating one export job.
pub struct ExportJob {
    source: SourceItem,
    config: ExportConfig,
    output: ResolvedOutput,
    remote: Arc<dyn RemoteDelegate>,
    transcode: Box<dyn TranscodeTask>,

    state: ExportState,
    upload_only: bool,
    transcode_done: bool,
    upload_done: bool,
    uploaded_file_ref: Option<FileReference>,
    error_message: Option<String>,
    tag_id: Option<TagId>,
    // Highest progress value handed out so far; readings never go backwards
    high_water: f64,
}

impl ExportJob {
    /// Construct a job around an immutable configuration snapshot. Both
    /// collaborators are injected; nothing is touched until `start`.
    pub fn new(
        source: SourceItem,
        config: ExportConfig,
        output: ResolvedOutput,
        remote: Arc<dyn RemoteDelegate>,
        transcode: Box<dyn TranscodeTask>,
    ) -> Self {
        Self {
            source,
            config,
            output,
            remote,
            transcode,
            state: ExportState::Created,
            upload_only: false,
            transcode_done: false,
            upload_done: false,
            uploaded_file_ref: None,
            error_message: None,
            tag_id: None,
            high_water: 0.0,
        }
    }

    /// Current state.
    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Whether the job skipped the transcode phase. Meaningless before
    /// `start`.
    pub fn upload_only(&self) -> bool {
        self.upload_only
    }

    /// Remote reference for the uploaded file, once the upload returned.
    pub fn uploaded_file_ref(&self) -> Option<&FileReference> {
        self.uploaded_file_ref.as_ref()
    }

    /// First recorded failure, verbatim. Never overwritten.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Identifier of the provenance tag, once `pre_update_item` ran.
    pub fn tag_id(&self) -> Option<&TagId> {
        self.tag_id.as_ref()
    }

    /// Write the provenance record onto the original item.
    ///
    /// Must run on the host's coordination thread, before the job value is
    /// handed to whichever thread drives `step` -- the tag write mutates
    /// host-owned shared state. The tag is rebuilt in full for every job; a
    /// failure here is fatal since no work has started yet.
    pub fn pre_update_item(
        &mut self,
        item: &mut dyn TagStore,
        localtime: DateTime<Utc>,
    ) -> ExportResult<TagId> {
        let tag = ProvenanceTag::build(&self.config, &self.output, localtime);
        info!(tag_name = %tag.name, item = %self.source.label(), "attaching provenance tag");
        let id = item.attach_tag(tag)?;
        self.tag_id = Some(id.clone());
        Ok(id)
    }

    /// Start the job: authentication gate, phase plan, first phase.
    ///
    /// Upload-only jobs complete inside this call; two-phase jobs return
    /// with the transcode running and expect `step` to be driven.
    pub async fn start(&mut self) -> ExportResult<()> {
        if self.state != ExportState::Created {
            return Ok(());
        }

        if !self.remote.is_authenticated() {
            self.state = ExportState::AuthFailed;
            let err = ExportError::AuthenticationRequired;
            self.record_error(err.to_string());
            warn!(item = %self.source.label(), "export blocked: session not authenticated");
            return Err(err);
        }

        match self.source.direct_upload_path().map(Path::to_path_buf) {
            Some(path) => {
                // Already an encoded movie: no transcode phase, one upload
                self.upload_only = true;
                self.state = ExportState::UploadOnly;
                info!(
                    path = %path.display(),
                    project = self.config.target_project(),
                    "source is a movie container, uploading directly"
                );
                self.upload(path).await
            }
            None => {
                self.state = ExportState::Transcoding;
                info!(item = %self.source.label(), "starting transcode phase");
                if let Err(e) = self.transcode.start().await {
                    self.fail(&e);
                    return Err(e);
                }
                Ok(())
            }
        }
    }

    /// Advance one increment of work.
    ///
    /// A no-op for upload-only jobs (the single upload call in `start`
    /// already completed the job) and for any terminal state. Otherwise
    /// drives the transcode subsystem; when it reports completion the job
    /// moves to the upload phase and performs the upload.
    pub async fn step(&mut self) -> ExportResult<()> {
        if self.upload_only || self.state.is_terminal() {
            return Ok(());
        }
        if self.state != ExportState::Transcoding {
            return Ok(());
        }

        if let Err(e) = self.transcode.step().await {
            self.fail(&e);
            return Err(e);
        }

        if self.transcode.is_complete() {
            self.transcode_done = true;
            self.state = ExportState::Uploading;
            info!(path = %self.output.output_path.display(), "transcode complete, uploading");
            let path = self.output.output_path.clone();
            return self.upload(path).await;
        }

        Ok(())
    }

    /// Request cancellation.
    ///
    /// Cooperative: signals the transcode subsystem when it is the active
    /// phase and marks the job aborted immediately, without waiting for an
    /// acknowledgement. Idempotent; a no-op once the job is terminal.
    pub async fn abort(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        if self.state == ExportState::Transcoding {
            self.transcode.abort().await;
        }
        info!(item = %self.source.label(), state = %self.state, "export aborted");
        self.state = ExportState::Aborted;
    }

    /// Overall progress in `[0, 1]`, monotonically non-decreasing.
    ///
    /// Always `1.0` once any terminal state is reached, so polling hosts
    /// detect completion unambiguously even on failure paths.
    pub fn progress(&mut self) -> f64 {
        let raw = if self.state.is_terminal() {
            1.0
        } else {
            match self.state {
                ExportState::Created => 0.0,
                // Single atomic upload call: midpoint shown transiently
                ExportState::UploadOnly => progress::UPLOAD_START_MARK,
                ExportState::Transcoding => progress::transcode_phase(self.transcode.progress()),
                ExportState::Uploading => progress::upload_phase(0.0),
                _ => self.high_water,
            }
        };
        if raw > self.high_water {
            self.high_water = raw;
        }
        self.high_water
    }

    /// Release resources after the job is done. Upload-only jobs never
    /// opened a transcode phase, so there is nothing to close for them.
    pub fn finish(&mut self) {
        if !self.upload_only {
            self.transcode.finish();
        }
    }

    async fn upload(&mut self, path: PathBuf) -> ExportResult<()> {
        match self
            .remote
            .upload_file(&path, self.config.target_project())
            .await
        {
            Ok(file_ref) => {
                info!(file_ref = %file_ref, "upload complete");
                self.uploaded_file_ref = Some(file_ref);
                self.upload_done = true;
                self.state = ExportState::Finished;
                debug_assert!(self.upload_done && (self.upload_only || self.transcode_done));
                Ok(())
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    // First failure wins: record it verbatim, go terminal, never retry.
    fn fail(&mut self, err: &ExportError) {
        error!(item = %self.source.label(), %err, "export failed");
        self.record_error(err.to_string());
        self.state = ExportState::Errored;
    }

    fn record_error(&mut self, message: String) {
        if self.error_message.is_none() {
            self.error_message = Some(message);
        }
    }
}
