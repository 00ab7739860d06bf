//! Drives one two-phase export against in-process fakes.
//!
//! Run with: cargo run --example export_demo

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use shotship_export::{
    ExportJob, ExportResult, FileReference, RemoteDelegate, TagStore, TranscodeTask,
};
use shotship_models::{ExportConfig, ProvenanceTag, ResolvedOutput, SourceItem, TagId};

struct DemoRemote;

#[async_trait]
impl RemoteDelegate for DemoRemote {
    fn is_authenticated(&self) -> bool {
        true
    }

    async fn upload_file(
        &self,
        local_path: &Path,
        target_project: &str,
    ) -> ExportResult<FileReference> {
        info!(path = %local_path.display(), project = target_project, "uploading");
        Ok(FileReference::new("fref-demo"))
    }
}

struct DemoTranscode {
    steps: usize,
}

#[async_trait]
impl TranscodeTask for DemoTranscode {
    async fn start(&mut self) -> ExportResult<()> {
        Ok(())
    }

    async fn step(&mut self) -> ExportResult<()> {
        self.steps += 1;
        Ok(())
    }

    fn progress(&self) -> f64 {
        (self.steps as f64 / 5.0).min(1.0)
    }

    fn is_complete(&self) -> bool {
        self.steps >= 5
    }

    async fn abort(&mut self) {}

    fn finish(&mut self) {}
}

struct DemoItem;

impl TagStore for DemoItem {
    fn attach_tag(&mut self, tag: ProvenanceTag) -> ExportResult<TagId> {
        info!(tag = %tag.name, "tag attached");
        Ok(TagId::new())
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut job = ExportJob::new(
        SourceItem::Sequence {
            name: "Demo Seq".to_string(),
        },
        ExportConfig::default(),
        ResolvedOutput {
            path_template: "{shot}/{shot}.mov".to_string(),
            output_path: PathBuf::from("/tmp/demo.mov"),
            frame_range: (1, 24),
            start_frame: None,
            script_path: None,
        },
        Arc::new(DemoRemote),
        Box::new(DemoTranscode { steps: 0 }),
    );

    let mut item = DemoItem;
    job.pre_update_item(&mut item, Utc::now()).expect("tag write");

    job.start().await.expect("start");
    while job.progress() < 1.0 {
        job.step().await.expect("step");
        info!(progress = job.progress(), state = %job.state(), "tick");
    }
    job.finish();

    info!(
        file_ref = %job.uploaded_file_ref().expect("file ref"),
        "export finished"
    );
}
