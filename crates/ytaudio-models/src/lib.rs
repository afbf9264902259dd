//! Shared data models for the ytaudio backend.
//!
//! Pure types and string utilities used across the media, jobs, and API
//! crates: video identifier validation, filename sanitization, metadata
//! snapshots, and job status enums.

pub mod filename;
pub mod job_status;
pub mod video;

pub use filename::sanitize_filename;
pub use job_status::JobStatus;
pub use video::{validate_video_id, watch_url, VideoId, VideoIdError, VideoInfo};
