//! Streaming delivery of a job's artifact.
//!
//! The response body reads the artifact in fixed-size chunks. Cleanup is
//! owned by a lease guard stored inside the stream state: whether the body
//! is consumed to the end, dropped on client disconnect, or cut short by a
//! read error, dropping the stream drops the lease, which deletes the
//! artifact and releases the workspace exactly once.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{Body, Bytes};
use tokio::io::AsyncReadExt;
use tracing::{debug, error};

use ytaudio_jobs::WorkspaceRegistry;

/// Chunk size for artifact reads.
const CHUNK_SIZE: usize = 8192;

/// Owns the cleanup obligation for one delivered artifact.
///
/// `Drop` removes the artifact file if still present and releases the
/// owning workspace through the registry. Both operations are best-effort;
/// the registry logs and swallows deletion errors.
pub struct WorkspaceLease {
    artifact: PathBuf,
    workspace: PathBuf,
    registry: Arc<WorkspaceRegistry>,
}

impl WorkspaceLease {
    pub fn new(artifact: PathBuf, workspace: PathBuf, registry: Arc<WorkspaceRegistry>) -> Self {
        Self {
            artifact,
            workspace,
            registry,
        }
    }
}

impl Drop for WorkspaceLease {
    fn drop(&mut self) {
        if self.artifact.exists() {
            if let Err(e) = std::fs::remove_file(&self.artifact) {
                error!(artifact = %self.artifact.display(), error = %e, "Failed to remove artifact");
            }
        }
        self.registry.release(&self.workspace);
        debug!(workspace = %self.workspace.display(), "Delivery lease released");
    }
}

struct ReadState {
    file: tokio::fs::File,
    // Held for its Drop; releasing the lease is the point of this field.
    _lease: WorkspaceLease,
}

/// Build a response body that streams `file` and cleans up via `lease`.
pub fn artifact_body(file: tokio::fs::File, lease: WorkspaceLease) -> Body {
    let state = ReadState {
        file,
        _lease: lease,
    };

    let stream = futures_util::stream::unfold(state, |mut state| async move {
        let mut buf = vec![0u8; CHUNK_SIZE];
        match state.file.read(&mut buf).await {
            Ok(0) => None,
            Ok(n) => {
                buf.truncate(n);
                Some((Ok::<Bytes, std::io::Error>(Bytes::from(buf)), state))
            }
            Err(e) => {
                // Terminate early; dropping the state still runs cleanup
                error!(error = %e, "Error while streaming artifact");
                None
            }
        }
    });

    Body::from_stream(stream)
}
