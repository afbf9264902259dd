//! Video identifier validation and metadata snapshot.

use serde::{Deserialize, Serialize};

/// A validated YouTube video identifier.
pub type VideoId = String;

/// Errors that can occur during video ID validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VideoIdError {
    #[error("Video ID must be exactly 11 characters")]
    InvalidLength,
    #[error("Video ID contains invalid characters")]
    InvalidCharacters,
}

/// Validate a YouTube video ID.
///
/// Video IDs are exactly 11 characters of alphanumerics, hyphens, and
/// underscores. Returns the trimmed ID on success.
pub fn validate_video_id(id: &str) -> Result<VideoId, VideoIdError> {
    let id = id.trim();

    if id.len() != 11 {
        return Err(VideoIdError::InvalidLength);
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(VideoIdError::InvalidCharacters);
    }

    Ok(id.to_string())
}

/// Build the canonical watch URL for a video ID.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Metadata snapshot returned by the extractor for a single video.
///
/// Parsed from `yt-dlp --dump-json` output; only the fields the backend
/// actually consumes are deserialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Video title, used to derive the artifact display name.
    #[serde(default = "default_title")]
    pub title: String,
    /// Duration in seconds, when the extractor reports one.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Channel or uploader name.
    #[serde(default)]
    pub uploader: Option<String>,
    /// Canonical page URL.
    #[serde(default)]
    pub webpage_url: Option<String>,
}

fn default_title() -> String {
    "audio".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_video_id_accepts_canonical_ids() {
        assert_eq!(validate_video_id("dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
        assert_eq!(validate_video_id("a-b_c123XYZ").unwrap(), "a-b_c123XYZ");
        // Surrounding whitespace is trimmed
        assert_eq!(validate_video_id("  dQw4w9WgXcQ  ").unwrap(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_validate_video_id_rejects_bad_input() {
        assert_eq!(validate_video_id("short"), Err(VideoIdError::InvalidLength));
        assert_eq!(
            validate_video_id("waytoolongvideoid"),
            Err(VideoIdError::InvalidLength)
        );
        assert_eq!(
            validate_video_id("abc123def!!"),
            Err(VideoIdError::InvalidCharacters)
        );
        assert_eq!(
            validate_video_id("abc 123 def"),
            Err(VideoIdError::InvalidCharacters)
        );
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            watch_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_video_info_parses_dump_json_subset() {
        let raw = r#"{
            "title": "Test Video",
            "duration": 212.5,
            "uploader": "Test Channel",
            "webpage_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "view_count": 12345
        }"#;
        let info: VideoInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(info.title, "Test Video");
        assert_eq!(info.duration, Some(212.5));
        assert_eq!(info.uploader.as_deref(), Some("Test Channel"));
    }

    #[test]
    fn test_video_info_missing_title_defaults() {
        let info: VideoInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(info.title, "audio");
        assert!(info.duration.is_none());
    }
}
