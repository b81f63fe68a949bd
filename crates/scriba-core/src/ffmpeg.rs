//! FFmpeg/ffprobe subprocess wrappers for duration probing and segment extraction.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::process::Command;

/// Probe the total duration of an audio file in seconds.
///
/// Runs ffprobe in metadata-only mode and parses its stdout. Fails softly:
/// a spawn error, non-zero exit, or unparsable output all yield `0.0`.
/// Callers must treat `0.0` as "duration unknown", never as an empty file.
pub async fn probe_duration(path: &Path) -> f64 {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-show_entries",
            "format=duration",
            "-of",
            "csv=p=0",
        ])
        .arg(path)
        .output()
        .await;

    let output = match output {
        Ok(output) => output,
        Err(err) => {
            crate::verbose!(
                "ffprobe failed to run ({err}). Make sure ffprobe is installed."
            );
            return 0.0;
        }
    };

    if !output.status.success() {
        crate::verbose!("ffprobe exited with {} for {}", output.status, path.display());
        return 0.0;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match stdout.trim().parse::<f64>() {
        Ok(duration) => duration,
        Err(_) => {
            crate::verbose!("ffprobe produced unparsable duration: {:?}", stdout.trim());
            0.0
        }
    }
}

/// Extract one time window of `source` into a standalone segment file.
///
/// The segment is re-encoded to mono 16 kHz PCM WAV regardless of the source
/// format, so every segment has a predictable encoding and size.
///
/// # Errors
/// Returns an error if ffmpeg cannot be run, exits non-zero, or the output
/// file is missing afterwards. The split orchestrator records the failure and
/// moves on to the next segment.
pub async fn extract_segment(
    source: &Path,
    start_secs: u64,
    duration_secs: u64,
    output: &Path,
) -> Result<()> {
    let status = Command::new("ffmpeg")
        .args(["-hide_banner", "-loglevel", "error", "-i"])
        .arg(source)
        .args([
            "-ss",
            &start_secs.to_string(),
            "-t",
            &duration_secs.to_string(),
            "-acodec",
            "pcm_s16le",
            "-ar",
            "16000",
            "-ac",
            "1",
            "-y",
        ])
        .arg(output)
        .status()
        .await
        .context("Failed to execute ffmpeg. Make sure ffmpeg is installed.")?;

    if !status.success() {
        anyhow::bail!("ffmpeg segment extraction failed with {status}");
    }

    if !output.exists() {
        anyhow::bail!(
            "ffmpeg reported success but produced no output at {}",
            output.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // These tests exercise only the failure contracts, so they hold whether or
    // not ffmpeg/ffprobe are installed on the test machine.

    #[tokio::test]
    async fn test_probe_missing_file_yields_zero() {
        let duration = probe_duration(Path::new("/nonexistent/clip.wav")).await;
        assert_eq!(duration, 0.0);
    }

    #[tokio::test]
    async fn test_probe_non_audio_file_yields_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.wav");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"this is not a wav file").unwrap();

        let duration = probe_duration(&path).await;
        assert_eq!(duration, 0.0);
    }

    #[tokio::test]
    async fn test_extract_from_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("segment_000.wav");
        let result =
            extract_segment(Path::new("/nonexistent/clip.wav"), 0, 60, &output).await;
        assert!(result.is_err());
    }
}
