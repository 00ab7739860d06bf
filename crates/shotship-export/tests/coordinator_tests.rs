//! End-to-end coordinator scenarios with mocked collaborators.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockall::mock;

use shotship_export::{
    ExportError, ExportJob, ExportResult, FileReference, RemoteDelegate, TagStore, TranscodeTask,
};
use shotship_models::{
    ConfigOverrides, CutHandles, ExportConfig, ExportPreset, ExportState, ProvenanceTag,
    ResolvedOutput, SourceItem, TagId,
};

mock! {
    Remote {}

    #[async_trait]
    impl RemoteDelegate for Remote {
        fn is_authenticated(&self) -> bool;
        async fn upload_file(
            &self,
            local_path: &Path,
            target_project: &str,
        ) -> ExportResult<FileReference>;
    }
}

/// Transcode fake that completes after a fixed number of steps.
struct ScriptedTranscode {
    steps_to_complete: usize,
    steps_taken: usize,
    started: bool,
}

impl ScriptedTranscode {
    fn new(steps_to_complete: usize) -> Box<Self> {
        Box::new(Self {
            steps_to_complete,
            steps_taken: 0,
            started: false,
        })
    }
}

#[async_trait]
impl TranscodeTask for ScriptedTranscode {
    async fn start(&mut self) -> ExportResult<()> {
        self.started = true;
        Ok(())
    }

    async fn step(&mut self) -> ExportResult<()> {
        assert!(self.started, "step before start");
        self.steps_taken += 1;
        Ok(())
    }

    fn progress(&self) -> f64 {
        (self.steps_taken as f64 / self.steps_to_complete as f64).min(1.0)
    }

    fn is_complete(&self) -> bool {
        self.steps_taken >= self.steps_to_complete
    }

    async fn abort(&mut self) {}

    fn finish(&mut self) {}
}

/// Transcode fake that must never be touched.
struct UntouchableTranscode;

#[async_trait]
impl TranscodeTask for UntouchableTranscode {
    async fn start(&mut self) -> ExportResult<()> {
        panic!("transcode subsystem invoked");
    }

    async fn step(&mut self) -> ExportResult<()> {
        panic!("transcode subsystem invoked");
    }

    fn progress(&self) -> f64 {
        0.0
    }

    fn is_complete(&self) -> bool {
        false
    }

    async fn abort(&mut self) {}

    fn finish(&mut self) {}
}

#[derive(Default)]
struct InMemoryTags {
    attached: Vec<ProvenanceTag>,
}

impl TagStore for InMemoryTags {
    fn attach_tag(&mut self, tag: ProvenanceTag) -> ExportResult<TagId> {
        self.attached.push(tag);
        Ok(TagId::new())
    }
}

fn movie_output() -> ResolvedOutput {
    ResolvedOutput {
        path_template: "{shot}/{shot}.mov".to_string(),
        output_path: PathBuf::from("/renders/seq/seq.mov"),
        frame_range: (1001, 1100),
        start_frame: Some(1001),
        script_path: None,
    }
}

/// Scenario A: authenticated session, movie-container clip. One direct
/// upload into the default project, no transcode, clean finish.
#[tokio::test]
async fn direct_upload_of_movie_clip() {
    let mut remote = MockRemote::new();
    remote.expect_is_authenticated().return_const(true);
    remote
        .expect_upload_file()
        .withf(|path, project| path == Path::new("shot010.mov") && project == "NukeStudio")
        .times(1)
        .returning(|_, _| Ok(FileReference::new("fref-42")));

    let mut job = ExportJob::new(
        SourceItem::Clip {
            media_path: PathBuf::from("shot010.mov"),
        },
        ExportConfig::default(),
        movie_output(),
        Arc::new(remote),
        Box::new(UntouchableTranscode),
    );

    job.start().await.unwrap();

    assert!(job.upload_only());
    assert_eq!(job.state(), ExportState::Finished);
    assert_eq!(job.progress(), 1.0);
    assert_eq!(job.uploaded_file_ref().unwrap().as_str(), "fref-42");
    job.finish();
}

/// Scenario B: image-sequence item with handles and retimes. Both phases
/// run, the provenance tag records the handle sizes and the retime flag.
#[tokio::test]
async fn transcode_then_upload_with_handles() {
    let mut remote = MockRemote::new();
    remote.expect_is_authenticated().return_const(true);
    remote
        .expect_upload_file()
        .withf(|path, project| path == Path::new("/renders/seq/seq.mov") && project == "NukeStudio")
        .times(1)
        .returning(|_, _| Ok(FileReference::new("fref-7")));

    let config = ExportConfig::resolve(
        &ExportPreset::default(),
        ConfigOverrides {
            cut_handles: Some(CutHandles::Frames { start: 8, end: 8 }),
            retime_enabled: Some(true),
            ..Default::default()
        },
    );

    let mut job = ExportJob::new(
        SourceItem::Sequence {
            name: "Seq 01".to_string(),
        },
        config,
        movie_output(),
        Arc::new(remote),
        ScriptedTranscode::new(3),
    );

    // Provenance write happens on the coordination thread, before any work
    let mut tags = InMemoryTags::default();
    let when = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();
    job.pre_update_item(&mut tags, when).unwrap();

    let tag = &tags.attached[0];
    let meta = tag.metadata();
    assert_eq!(meta["tag.starthandle"], "8");
    assert_eq!(meta["tag.endhandle"], "8");
    assert_eq!(meta["tag.appliedretimes"], "1");

    job.start().await.unwrap();
    assert_eq!(job.state(), ExportState::Transcoding);

    let mut seen = vec![job.progress()];
    while job.state() == ExportState::Transcoding {
        job.step().await.unwrap();
        seen.push(job.progress());
    }

    assert_eq!(job.state(), ExportState::Finished);
    assert_eq!(job.progress(), 1.0);
    // Monotonic, and every pre-terminal reading sat inside the phase bands
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    job.finish();
}

/// Scenario C: unauthenticated session. Terminal immediately, progress 1.0,
/// zero delegate and subsystem calls.
#[tokio::test]
async fn unauthenticated_session_never_starts_work() {
    let mut remote = MockRemote::new();
    remote.expect_is_authenticated().return_const(false);
    remote.expect_upload_file().times(0);

    let mut job = ExportJob::new(
        SourceItem::Clip {
            media_path: PathBuf::from("shot010.mov"),
        },
        ExportConfig::default(),
        movie_output(),
        Arc::new(remote),
        Box::new(UntouchableTranscode),
    );

    let err = job.start().await.unwrap_err();
    assert!(matches!(err, ExportError::AuthenticationRequired));
    assert_eq!(job.state(), ExportState::AuthFailed);
    assert_eq!(job.progress(), 1.0);
    assert!(job.error_message().unwrap().contains("log in"));

    // Stepping a dead job is harmless and calls nothing
    job.step().await.unwrap();
    assert_eq!(job.state(), ExportState::AuthFailed);
}

/// Aborting mid-transcode leaves a distinct terminal state with no error.
#[tokio::test]
async fn abort_mid_transcode_is_distinct_from_failure() {
    let mut remote = MockRemote::new();
    remote.expect_is_authenticated().return_const(true);
    remote.expect_upload_file().times(0);

    let mut job = ExportJob::new(
        SourceItem::Sequence {
            name: "Seq 02".to_string(),
        },
        ExportConfig::default(),
        movie_output(),
        Arc::new(remote),
        ScriptedTranscode::new(10),
    );

    job.start().await.unwrap();
    job.step().await.unwrap();
    job.abort().await;

    assert_eq!(job.state(), ExportState::Aborted);
    assert_eq!(job.progress(), 1.0);
    assert!(job.error_message().is_none());
}
