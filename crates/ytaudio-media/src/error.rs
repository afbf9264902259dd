//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while querying or extracting media.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("yt-dlp not found in PATH")]
    YtDlpNotFound,

    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("Video unavailable")]
    VideoNotFound,

    #[error("Video is private")]
    VideoPrivate,

    #[error("Video is age-restricted and requires login")]
    AgeRestricted,

    #[error("Rate limited by upstream. Please try again later")]
    RateLimited,

    #[error("Failed to reach the media source: {0}")]
    UpstreamTransport(String),

    #[error("Extraction failed: {message}")]
    ExtractionFailed {
        message: String,
        exit_code: Option<i32>,
    },

    #[error("No MP3 artifact found in {0}")]
    ArtifactMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse extractor output: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl MediaError {
    /// Create an extraction failure error.
    pub fn extraction_failed(message: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::ExtractionFailed {
            message: message.into(),
            exit_code,
        }
    }

    /// Classify a yt-dlp failure from its stderr output.
    ///
    /// The mapping is substring-based and best-effort: yt-dlp does not emit
    /// structured errors, so unknown failures fall through to
    /// `ExtractionFailed`.
    pub fn classify_ytdlp(stderr: &str, exit_code: Option<i32>) -> Self {
        let lower = stderr.to_lowercase();

        if lower.contains("video unavailable") || lower.contains("video is unavailable") {
            return Self::VideoNotFound;
        }
        if lower.contains("private video") {
            return Self::VideoPrivate;
        }
        if lower.contains("age restricted")
            || lower.contains("age-restricted")
            || lower.contains("sign in to confirm your age")
        {
            return Self::AgeRestricted;
        }
        if lower.contains("429")
            || lower.contains("too many requests")
            || lower.contains("rate limit")
        {
            return Self::RateLimited;
        }
        if lower.contains("unable to connect")
            || lower.contains("network is unreachable")
            || lower.contains("timed out")
            || lower.contains("connection reset")
            || lower.contains("getaddrinfo failed")
        {
            let last = stderr.lines().last().unwrap_or("network error").to_string();
            return Self::UpstreamTransport(last);
        }

        let last = stderr.lines().last().unwrap_or("unknown error").to_string();
        Self::extraction_failed(last, exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_not_found() {
        let err = MediaError::classify_ytdlp("ERROR: [youtube] abc: Video unavailable", Some(1));
        assert!(matches!(err, MediaError::VideoNotFound));
    }

    #[test]
    fn test_classify_private() {
        let err = MediaError::classify_ytdlp(
            "ERROR: [youtube] abc: Private video. Sign in if you've been granted access",
            Some(1),
        );
        assert!(matches!(err, MediaError::VideoPrivate));
    }

    #[test]
    fn test_classify_age_restricted() {
        let err = MediaError::classify_ytdlp(
            "ERROR: Sign in to confirm your age. This video may be inappropriate for some users.",
            Some(1),
        );
        assert!(matches!(err, MediaError::AgeRestricted));
    }

    #[test]
    fn test_classify_rate_limited() {
        let err =
            MediaError::classify_ytdlp("ERROR: HTTP Error 429: Too Many Requests", Some(1));
        assert!(matches!(err, MediaError::RateLimited));

        let err = MediaError::classify_ytdlp("yt-dlp hit a rate limit", Some(1));
        assert!(matches!(err, MediaError::RateLimited));
    }

    #[test]
    fn test_classify_transport() {
        let err = MediaError::classify_ytdlp(
            "ERROR: Unable to download webpage: <urlopen error timed out>",
            Some(1),
        );
        assert!(matches!(err, MediaError::UpstreamTransport(_)));
    }

    #[test]
    fn test_classify_unknown_falls_through() {
        let err = MediaError::classify_ytdlp("ERROR: something entirely new", Some(2));
        match err {
            MediaError::ExtractionFailed { exit_code, .. } => assert_eq!(exit_code, Some(2)),
            other => panic!("expected ExtractionFailed, got {other:?}"),
        }
    }
}
