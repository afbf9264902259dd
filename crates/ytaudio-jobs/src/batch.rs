//! Batch submission and the job-status store.
//!
//! Batch downloads accept work and return immediately, so an authoritative
//! record of each job's progress has to live somewhere the status endpoint
//! can read. The store tracks every batch by ID with one record per job.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use ytaudio_models::JobStatus;

use crate::error::{JobError, JobResult};
use crate::job::ExtractionJob;
use crate::pool::{JobSlotPool, MAX_BATCH_JOBS};
use crate::registry::WorkspaceRegistry;

/// Returned to the caller when a batch is accepted.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReceipt {
    pub batch_id: Uuid,
    pub total_videos: usize,
}

/// One job's record within a batch.
#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub job_id: Uuid,
    pub video_id: String,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Point-in-time view of a batch for the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSnapshot {
    pub batch_id: Uuid,
    pub total_videos: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub jobs: Vec<JobRecord>,
}

/// In-memory job-status store keyed by batch ID.
#[derive(Default)]
pub struct BatchStore {
    batches: Mutex<HashMap<Uuid, Vec<JobRecord>>>,
}

impl BatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a batch with one queued record per video ID. Returns the batch
    /// ID and the per-job tokens in submission order.
    pub fn create(&self, video_ids: &[String]) -> (Uuid, Vec<Uuid>) {
        let batch_id = Uuid::new_v4();
        let records: Vec<JobRecord> = video_ids
            .iter()
            .map(|video_id| JobRecord {
                job_id: Uuid::new_v4(),
                video_id: video_id.clone(),
                status: JobStatus::Queued,
                error: None,
            })
            .collect();
        let tokens = records.iter().map(|r| r.job_id).collect();

        let mut batches = self.batches.lock().expect("batch store lock poisoned");
        batches.insert(batch_id, records);
        (batch_id, tokens)
    }

    /// Update one job's status within a batch.
    pub fn set_status(&self, batch_id: &Uuid, job_id: &Uuid, status: JobStatus, error: Option<String>) {
        let mut batches = self.batches.lock().expect("batch store lock poisoned");
        if let Some(records) = batches.get_mut(batch_id) {
            if let Some(record) = records.iter_mut().find(|r| &r.job_id == job_id) {
                record.status = status;
                record.error = error;
            }
        }
    }

    /// Snapshot a batch's progress, if the batch exists.
    pub fn snapshot(&self, batch_id: &Uuid) -> Option<BatchSnapshot> {
        let batches = self.batches.lock().expect("batch store lock poisoned");
        let records = batches.get(batch_id)?;
        Some(BatchSnapshot {
            batch_id: *batch_id,
            total_videos: records.len(),
            succeeded: records
                .iter()
                .filter(|r| r.status == JobStatus::Succeeded)
                .count(),
            failed: records
                .iter()
                .filter(|r| r.status == JobStatus::Failed)
                .count(),
            jobs: records.clone(),
        })
    }

    /// Number of known batches.
    pub fn len(&self) -> usize {
        self.batches.lock().expect("batch store lock poisoned").len()
    }

    /// Whether no batches are tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Accepts batch submissions and fans jobs out through the slot pool.
#[derive(Clone)]
pub struct BatchCoordinator {
    registry: Arc<WorkspaceRegistry>,
    pool: JobSlotPool,
    store: Arc<BatchStore>,
    job: ExtractionJob,
}

impl BatchCoordinator {
    pub fn new(
        registry: Arc<WorkspaceRegistry>,
        pool: JobSlotPool,
        store: Arc<BatchStore>,
        job: ExtractionJob,
    ) -> Self {
        Self {
            registry,
            pool,
            store,
            job,
        }
    }

    /// Validate and enqueue a batch.
    ///
    /// Oversized and empty batches are rejected before any job, workspace,
    /// or store entry is created. Accepted jobs run under a shared batch
    /// namespace directory and update the store as they progress; their
    /// artifacts stay in the namespace until shutdown reclaims it.
    pub fn submit(&self, video_ids: Vec<String>) -> JobResult<BatchReceipt> {
        if video_ids.is_empty() {
            return Err(JobError::EmptyBatch);
        }
        if video_ids.len() > MAX_BATCH_JOBS {
            return Err(JobError::BatchTooLarge {
                submitted: video_ids.len(),
                cap: MAX_BATCH_JOBS,
            });
        }

        let (batch_id, tokens) = self.store.create(&video_ids);
        let namespace = self.registry.create_batch_namespace(&batch_id)?;

        info!(batch_id = %batch_id, total = video_ids.len(), "Accepted batch download");

        for (video_id, job_id) in video_ids.into_iter().zip(tokens) {
            let store = Arc::clone(&self.store);
            let job = self.job.clone();
            let namespace = namespace.clone();

            self.pool.spawn(async move {
                store.set_status(&batch_id, &job_id, JobStatus::Running, None);
                match job.run_in(&video_id, &namespace).await {
                    Ok(_output) => {
                        store.set_status(&batch_id, &job_id, JobStatus::Succeeded, None);
                    }
                    Err(e) => {
                        warn!(batch_id = %batch_id, video_id = %video_id, error = %e, "Batch job failed");
                        store.set_status(&batch_id, &job_id, JobStatus::Failed, Some(e.to_string()));
                    }
                }
            });
        }

        Ok(BatchReceipt {
            batch_id,
            total_videos: self
                .store
                .snapshot(&batch_id)
                .map(|s| s.total_videos)
                .unwrap_or(0),
        })
    }

    /// Read a batch's progress.
    pub fn status(&self, batch_id: &Uuid) -> Option<BatchSnapshot> {
        self.store.snapshot(batch_id)
    }
}
