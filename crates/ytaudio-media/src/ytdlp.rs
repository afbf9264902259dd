//! Audio extraction using yt-dlp.
//!
//! yt-dlp resolves a video ID to a media stream and hands post-processing to
//! ffmpeg, which produces a constant-bitrate 320 kbps MP3 inside the
//! directory the caller provides.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use ytaudio_models::{watch_url, VideoInfo};

use crate::error::{MediaError, MediaResult};

/// Target MP3 bitrate handed to the ffmpeg post-processor.
const AUDIO_QUALITY: &str = "320K";

/// Check if yt-dlp is available.
pub fn check_ytdlp() -> MediaResult<PathBuf> {
    which::which("yt-dlp").map_err(|_| MediaError::YtDlpNotFound)
}

/// Check if ffmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

/// Query metadata for a video without downloading it.
///
/// Runs `yt-dlp --dump-json --no-download` and parses the subset of fields
/// the backend consumes.
pub async fn fetch_video_info(video_id: &str) -> MediaResult<VideoInfo> {
    check_ytdlp()?;

    let url = watch_url(video_id);
    debug!(video_id = %video_id, "Fetching video metadata");

    let output = Command::new("yt-dlp")
        .args(["--dump-json", "--no-download", "--no-playlist", "--quiet"])
        .arg(&url)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(video_id = %video_id, "yt-dlp metadata stderr: {}", stderr);
        return Err(MediaError::classify_ytdlp(&stderr, output.status.code()));
    }

    let info: VideoInfo = serde_json::from_slice(&output.stdout)?;
    Ok(info)
}

/// Download a video's audio and transcode it to MP3 inside `dir`.
///
/// The output template is `<dir>/%(title)s.%(ext)s`, so the produced file
/// lands inside the caller's workspace with the upstream title as its stem.
pub async fn extract_audio(video_id: &str, dir: impl AsRef<Path>) -> MediaResult<()> {
    check_ytdlp()?;

    let dir = dir.as_ref();
    let url = watch_url(video_id);
    let output_template = dir.join("%(title)s.%(ext)s");

    info!(video_id = %video_id, workspace = %dir.display(), "Extracting audio");

    let output = Command::new("yt-dlp")
        .args([
            "-f",
            "bestaudio",
            "--extract-audio",
            "--audio-format",
            "mp3",
            "--audio-quality",
            AUDIO_QUALITY,
            "--no-playlist",
            "--quiet",
            "-o",
        ])
        .arg(&output_template)
        .arg(&url)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(video_id = %video_id, "yt-dlp extraction stderr: {}", stderr);

        let err = MediaError::classify_ytdlp(&stderr, output.status.code());
        if matches!(err, MediaError::RateLimited) {
            warn!(video_id = %video_id, "Upstream rate limit detected");
        }
        return Err(err);
    }

    Ok(())
}

/// Seam between jobs and the external extraction tool.
///
/// Production uses [`YtDlpExtractor`]; tests substitute fakes that write
/// files directly.
#[async_trait]
pub trait AudioExtractor: Send + Sync {
    /// Query metadata for a video identifier.
    async fn fetch_info(&self, video_id: &str) -> MediaResult<VideoInfo>;

    /// Produce an MP3 for the video inside `dir`.
    async fn extract(&self, video_id: &str, dir: &Path) -> MediaResult<()>;
}

/// The real yt-dlp backed extractor.
#[derive(Debug, Default, Clone)]
pub struct YtDlpExtractor;

#[async_trait]
impl AudioExtractor for YtDlpExtractor {
    async fn fetch_info(&self, video_id: &str) -> MediaResult<VideoInfo> {
        fetch_video_info(video_id).await
    }

    async fn extract(&self, video_id: &str, dir: &Path) -> MediaResult<()> {
        extract_audio(video_id, dir).await
    }
}
