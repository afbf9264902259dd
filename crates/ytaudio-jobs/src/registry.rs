//! Process-wide tracking of live workspace directories.
//!
//! Every temporary directory a job creates is registered here so it can be
//! reclaimed on every exit path: job completion, job failure, and process
//! shutdown. The registry is an explicitly owned object held by the server
//! state, and the signal handler drains it through the same code path as
//! normal teardown.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info, warn};
use uuid::Uuid;

/// Tracked set of active workspace directories rooted at a base directory.
///
/// Filesystem operations are synchronous so releases also work from `Drop`
/// guards; directory deletion is best-effort and never propagates errors.
pub struct WorkspaceRegistry {
    base: PathBuf,
    active: Mutex<HashSet<PathBuf>>,
}

impl WorkspaceRegistry {
    /// Create a registry rooted at `base`, creating the directory if needed.
    pub fn new(base: impl Into<PathBuf>) -> std::io::Result<Self> {
        let base = base.into();
        std::fs::create_dir_all(&base)?;
        Ok(Self {
            base,
            active: Mutex::new(HashSet::new()),
        })
    }

    /// Registry rooted at the system temp directory.
    pub fn in_temp_dir() -> std::io::Result<Self> {
        Self::new(std::env::temp_dir().join("ytaudio-work"))
    }

    /// Base directory all workspaces live under.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Create and register a fresh uniquely-named workspace.
    pub fn create_workspace(&self) -> std::io::Result<PathBuf> {
        self.create_workspace_in(&self.base)
    }

    /// Create and register a workspace under a parent directory, typically a
    /// shared batch namespace.
    pub fn create_workspace_in(&self, parent: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let path = parent.as_ref().join(Uuid::new_v4().to_string());
        std::fs::create_dir_all(&path)?;
        self.register(&path);
        debug!(workspace = %path.display(), "Created workspace");
        Ok(path)
    }

    /// Create and register a shared namespace directory for a batch.
    pub fn create_batch_namespace(&self, batch_id: &Uuid) -> std::io::Result<PathBuf> {
        let path = self.base.join(format!("batch-{batch_id}"));
        std::fs::create_dir_all(&path)?;
        self.register(&path);
        Ok(path)
    }

    /// Track a directory. Idempotent.
    pub fn register(&self, path: impl AsRef<Path>) {
        let mut active = self.active.lock().expect("registry lock poisoned");
        active.insert(path.as_ref().to_path_buf());
    }

    /// Stop tracking a directory and delete it from disk.
    ///
    /// Deletion errors are logged and swallowed; by the time release is
    /// called the caller no longer needs the workspace either way.
    pub fn release(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        {
            let mut active = self.active.lock().expect("registry lock poisoned");
            active.remove(path);
        }
        remove_dir_best_effort(path);
    }

    /// Release every tracked workspace and clear the set.
    ///
    /// Invoked on shutdown (normal exit and termination signals take the
    /// same path) and by tests.
    pub fn drain_all(&self) {
        let snapshot: Vec<PathBuf> = {
            let mut active = self.active.lock().expect("registry lock poisoned");
            active.drain().collect()
        };

        if !snapshot.is_empty() {
            info!(count = snapshot.len(), "Draining workspace registry");
        }
        for path in snapshot {
            remove_dir_best_effort(&path);
        }
    }

    /// Remove leftover workspaces from a previous run.
    ///
    /// Anything under the base directory that is not currently tracked is a
    /// stale remnant; a fresh process has an empty tracked set, so on boot
    /// this sweeps the whole base directory.
    pub fn clean_stale_on_boot(&self) {
        let entries = match std::fs::read_dir(&self.base) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(base = %self.base.display(), error = %e, "Failed to scan work directory");
                return;
            }
        };

        let active = self.active.lock().expect("registry lock poisoned");
        let mut removed = 0usize;
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !active.contains(&path) {
                remove_dir_best_effort(&path);
                removed += 1;
            }
        }
        if removed > 0 {
            info!(count = removed, "Removed stale workspaces from previous run");
        }
    }

    /// Number of tracked workspaces.
    pub fn len(&self) -> usize {
        self.active.lock().expect("registry lock poisoned").len()
    }

    /// Whether no workspaces are tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a specific path is tracked.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.active
            .lock()
            .expect("registry lock poisoned")
            .contains(path.as_ref())
    }
}

fn remove_dir_best_effort(path: &Path) {
    if !path.exists() {
        return;
    }
    match std::fs::remove_dir_all(path) {
        Ok(()) => debug!(workspace = %path.display(), "Removed workspace"),
        Err(e) => warn!(workspace = %path.display(), error = %e, "Failed to remove workspace"),
    }
}
