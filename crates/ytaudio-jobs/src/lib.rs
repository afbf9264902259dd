//! Transient-resource lifecycle and concurrency-bounded job core.
//!
//! Owns the three invariants the backend is built around:
//!
//! - every workspace directory is tracked from creation to deletion and is
//!   reclaimed on success, failure, and process shutdown alike
//! - at most N extraction+transcode jobs run at once; excess work queues
//! - a failed job releases its workspace before its error propagates

pub mod batch;
pub mod error;
pub mod job;
pub mod pool;
pub mod registry;

pub use batch::{BatchCoordinator, BatchReceipt, BatchSnapshot, BatchStore, JobRecord};
pub use error::{JobError, JobResult};
pub use job::{ExtractionJob, JobOutput};
pub use pool::{JobSlotPool, DEFAULT_SLOTS, MAX_BATCH_JOBS};
pub use registry::WorkspaceRegistry;
