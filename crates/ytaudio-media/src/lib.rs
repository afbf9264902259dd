//! External-tool integration for the ytaudio backend.
//!
//! Wraps yt-dlp (media extraction) and ffmpeg (transcoding) behind the
//! [`AudioExtractor`] seam, classifies upstream failures into typed errors,
//! locates produced artifacts, and memoizes metadata lookups.

pub mod artifact;
pub mod cache;
pub mod error;
pub mod ytdlp;

pub use artifact::{locate_mp3, Artifact};
pub use cache::{InfoCache, DEFAULT_CACHE_TTL};
pub use error::{MediaError, MediaResult};
pub use ytdlp::{check_ffmpeg, check_ytdlp, AudioExtractor, YtDlpExtractor};
