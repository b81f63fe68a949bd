//! Output file path derivation and result writing.
//!
//! Both results land next to the source file: the transcript replaces the
//! audio extension with `.txt`, the analysis gets a `_ai.txt` suffix.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// `<input>.txt`, with the audio extension replaced.
pub fn transcript_path(input: &Path) -> PathBuf {
    input.with_extension("txt")
}

/// `<input stem>_ai.txt` in the same directory as the input.
pub fn analysis_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let file_name = format!("{stem}_ai.txt");
    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Write UTF-8 text to the given path.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_path_replaces_extension() {
        assert_eq!(
            transcript_path(Path::new("/tmp/meeting.m4a")),
            PathBuf::from("/tmp/meeting.txt")
        );
    }

    #[test]
    fn test_analysis_path_appends_suffix() {
        assert_eq!(
            analysis_path(Path::new("/tmp/meeting.m4a")),
            PathBuf::from("/tmp/meeting_ai.txt")
        );
    }

    #[test]
    fn test_analysis_path_without_directory() {
        assert_eq!(
            analysis_path(Path::new("meeting.wav")),
            PathBuf::from("meeting_ai.txt")
        );
    }
}
