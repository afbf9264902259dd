//! Locating and describing the produced audio artifact.

use std::path::{Path, PathBuf};

use crate::error::{MediaError, MediaResult};

/// The single transcoded audio file produced by a successful job.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Absolute path inside the owning workspace.
    pub path: PathBuf,
    /// Sanitized display name (without extension) for Content-Disposition.
    pub display_name: String,
    /// File size in bytes.
    pub size_bytes: u64,
}

/// Locate the MP3 produced inside a workspace.
///
/// Exactly one match is expected. Zero matches is a fatal job error. When
/// several exist, the lexicographically smallest path wins so the choice is
/// deterministic across runs.
pub fn locate_mp3(dir: impl AsRef<Path>) -> MediaResult<PathBuf> {
    let dir = dir.as_ref();
    let mut found: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("mp3"))
                .unwrap_or(false)
        })
        .collect();

    found.sort();

    found
        .into_iter()
        .next()
        .ok_or_else(|| MediaError::ArtifactMissing(dir.to_path_buf()))
}

impl Artifact {
    /// Build an artifact descriptor from a located file.
    pub fn from_path(path: PathBuf, display_name: String) -> MediaResult<Self> {
        let size_bytes = std::fs::metadata(&path)?.len();
        Ok(Self {
            path,
            display_name,
            size_bytes,
        })
    }

    /// Download filename for the Content-Disposition header.
    pub fn download_filename(&self) -> String {
        format!("{}.mp3", self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_locate_single_mp3() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("song.mp3"), b"data").unwrap();
        std::fs::write(dir.path().join("song.webm"), b"raw").unwrap();

        let found = locate_mp3(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "song.mp3");
    }

    #[test]
    fn test_locate_no_mp3_is_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("song.webm"), b"raw").unwrap();

        let err = locate_mp3(dir.path()).unwrap_err();
        assert!(matches!(err, MediaError::ArtifactMissing(_)));
    }

    #[test]
    fn test_locate_multiple_is_deterministic() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.mp3"), b"data").unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"data").unwrap();
        std::fs::write(dir.path().join("c.mp3"), b"data").unwrap();

        let found = locate_mp3(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "a.mp3");

        // Same answer on repeat lookups
        assert_eq!(locate_mp3(dir.path()).unwrap(), found);
    }

    #[test]
    fn test_extension_case_insensitive() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("SONG.MP3"), b"data").unwrap();

        let found = locate_mp3(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "SONG.MP3");
    }

    #[test]
    fn test_artifact_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("song.mp3");
        std::fs::write(&path, b"0123456789").unwrap();

        let artifact = Artifact::from_path(path, "My_Song".to_string()).unwrap();
        assert_eq!(artifact.size_bytes, 10);
        assert_eq!(artifact.download_filename(), "My_Song.mp3");
    }
}
