//! Error types for job execution.

use thiserror::Error;

/// Result type for job operations.
pub type JobResult<T> = Result<T, JobError>;

/// Errors that can occur while running extraction-transcode jobs.
#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Media(#[from] ytaudio_media::MediaError),

    #[error("Batch too large: {submitted} jobs exceeds the cap of {cap}")]
    BatchTooLarge { submitted: usize, cap: usize },

    #[error("Empty batch: no video IDs provided")]
    EmptyBatch,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
