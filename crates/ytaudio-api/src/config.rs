//! API configuration.

use std::path::PathBuf;

use ytaudio_jobs::DEFAULT_SLOTS;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Base directory for per-job workspaces
    pub work_dir: PathBuf,
    /// Concurrent extraction+transcode job limit
    pub job_slots: usize,
    /// Per-IP request limit on /download, per minute
    pub download_rate_per_minute: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5328,
            work_dir: std::env::temp_dir().join("ytaudio-work"),
            job_slots: DEFAULT_SLOTS,
            download_rate_per_minute: 3,
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            work_dir: std::env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            job_slots: std::env::var("JOB_SLOTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.job_slots),
            download_rate_per_minute: std::env::var("DOWNLOAD_RATE_PER_MINUTE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.download_rate_per_minute),
        }
    }
}
