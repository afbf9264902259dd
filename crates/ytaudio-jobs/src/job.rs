//! The per-request extraction-transcode job.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use ytaudio_media::{locate_mp3, Artifact, AudioExtractor, InfoCache};
use ytaudio_models::sanitize_filename;

use crate::error::JobResult;
use crate::registry::WorkspaceRegistry;

/// A successful job's output.
///
/// Ownership of both the artifact and the workspace transfers to the caller;
/// the job registers the workspace but deletes it only on failure.
#[derive(Debug)]
pub struct JobOutput {
    pub artifact: Artifact,
    pub workspace: PathBuf,
}

/// Runs a single video ID through extraction and transcoding.
///
/// Steps execute strictly in order: workspace, metadata, extraction,
/// artifact location. Any failure releases the workspace before the error
/// propagates, so no workspace is ever left registered but abandoned.
#[derive(Clone)]
pub struct ExtractionJob {
    registry: Arc<WorkspaceRegistry>,
    cache: Arc<InfoCache>,
    extractor: Arc<dyn AudioExtractor>,
}

impl ExtractionJob {
    pub fn new(
        registry: Arc<WorkspaceRegistry>,
        cache: Arc<InfoCache>,
        extractor: Arc<dyn AudioExtractor>,
    ) -> Self {
        Self {
            registry,
            cache,
            extractor,
        }
    }

    /// Run the job in a fresh workspace under the registry base.
    pub async fn run(&self, video_id: &str) -> JobResult<JobOutput> {
        let workspace = self.registry.create_workspace()?;
        self.run_in_workspace(video_id, workspace).await
    }

    /// Run the job in a fresh workspace under a shared batch namespace.
    pub async fn run_in(&self, video_id: &str, namespace: &Path) -> JobResult<JobOutput> {
        let workspace = self.registry.create_workspace_in(namespace)?;
        self.run_in_workspace(video_id, workspace).await
    }

    async fn run_in_workspace(&self, video_id: &str, workspace: PathBuf) -> JobResult<JobOutput> {
        match self.execute(video_id, &workspace).await {
            Ok(artifact) => Ok(JobOutput {
                artifact,
                workspace,
            }),
            Err(e) => {
                // Reclaim before propagating; every failure path releases
                // exactly this one workspace.
                self.registry.release(&workspace);
                Err(e)
            }
        }
    }

    async fn execute(&self, video_id: &str, workspace: &Path) -> JobResult<Artifact> {
        let info = self.cache.lookup(video_id).await?;
        let display_name = sanitize_filename(&info.title);
        debug!(video_id = %video_id, title = %display_name, "Resolved video title");

        self.extractor.extract(video_id, workspace).await?;

        let path = locate_mp3(workspace)?;
        let artifact = Artifact::from_path(path, display_name)?;

        info!(
            video_id = %video_id,
            artifact = %artifact.path.display(),
            size_bytes = artifact.size_bytes,
            "Extraction job succeeded"
        );
        Ok(artifact)
    }
}
