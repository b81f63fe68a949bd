//! Audio asset handling: path, size and content-type inference.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// An audio file on disk, with its size and media type captured at construction.
///
/// Segment files produced by splitting are assets too; they live in the split
/// workspace and disappear with it.
#[derive(Debug, Clone)]
pub struct AudioAsset {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl AudioAsset {
    /// Build an asset from a file on disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be stat'ed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Failed to read audio file metadata: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            size_bytes: metadata.len(),
            mime_type: mime_for_path(path).to_string(),
        })
    }

    /// File name component of the asset path, for upload form parts.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.wav".to_string())
    }
}

/// Infer the media content type from the file extension.
///
/// Unknown extensions fall back to `audio/wav`, which every transcription
/// deployment accepts.
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "flac" => "audio/flac",
        "ogg" => "audio/ogg",
        "webm" => "audio/webm",
        _ => "audio/wav",
    }
}
