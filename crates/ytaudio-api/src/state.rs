//! Application state.

use std::sync::Arc;

use ytaudio_jobs::{
    BatchCoordinator, BatchStore, ExtractionJob, JobSlotPool, WorkspaceRegistry,
};
use ytaudio_media::{AudioExtractor, InfoCache};

use crate::config::ApiConfig;

/// Shared application state.
///
/// Owns the cross-request mutable objects — workspace registry, info cache,
/// slot pool, batch store — so their lifecycles are explicit: built once at
/// startup, drained once at shutdown.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub registry: Arc<WorkspaceRegistry>,
    pub cache: Arc<InfoCache>,
    pub pool: JobSlotPool,
    pub batches: BatchCoordinator,
    extractor: Arc<dyn AudioExtractor>,
}

impl AppState {
    /// Create application state around the given extractor.
    ///
    /// Production passes `YtDlpExtractor`; tests substitute fakes.
    pub fn new(config: ApiConfig, extractor: Arc<dyn AudioExtractor>) -> std::io::Result<Self> {
        let registry = Arc::new(WorkspaceRegistry::new(&config.work_dir)?);
        let cache = Arc::new(InfoCache::new(Arc::clone(&extractor)));
        let pool = JobSlotPool::new(config.job_slots);

        let job = ExtractionJob::new(
            Arc::clone(&registry),
            Arc::clone(&cache),
            Arc::clone(&extractor),
        );
        let batches = BatchCoordinator::new(
            Arc::clone(&registry),
            pool.clone(),
            Arc::new(BatchStore::new()),
            job,
        );

        Ok(Self {
            config,
            registry,
            cache,
            pool,
            batches,
            extractor,
        })
    }

    /// Build a job runner wired to this state's registry, cache, and
    /// extractor.
    pub fn extraction_job(&self) -> ExtractionJob {
        ExtractionJob::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.cache),
            Arc::clone(&self.extractor),
        )
    }
}
