//! Large-file splitting: planning, extraction and workspace lifecycle.
//!
//! Files over the whole-file upload ceiling are divided into time-bounded
//! segments which are transcribed one at a time. A failed extraction drops
//! that segment and keeps going; the operation only fails outright when no
//! segment survives.

mod planner;
mod workspace;

pub use planner::{MAX_SEGMENT_SECS, MIN_SEGMENT_SECS, SplitPlan, TARGET_SEGMENT_BYTES};
pub use workspace::SplitWorkspace;

use anyhow::Result;
use thiserror::Error;

use crate::asset::AudioAsset;
use crate::ffmpeg;

/// Failures of the split operation itself. Per-segment extraction failures
/// are not listed here: they are recoverable and only surface as omissions.
#[derive(Debug, Error, PartialEq)]
pub enum SplitError {
    #[error("could not determine audio duration; the file may be corrupt or ffprobe unavailable")]
    UnknownDuration,
    #[error("audio file is empty")]
    EmptySource,
    #[error("splitting produced no usable segments")]
    NoUsableSegments,
}

/// One extracted segment, tagged with its 0-based plan index.
///
/// The index survives extraction gaps: if segment 1 of 3 fails to extract,
/// the remaining assets still carry indices 0 and 2.
#[derive(Debug)]
pub struct SegmentAsset {
    pub index: u64,
    pub asset: AudioAsset,
}

/// The ordered outcome of a split operation.
///
/// Owns the workspace guard, so the segment files stay on disk exactly as
/// long as this value lives and are removed with it.
#[derive(Debug)]
pub struct SplitSegments {
    pub segments: Vec<SegmentAsset>,
    /// Total planned segment count, including any that failed to extract.
    pub segment_count: u64,
    pub(crate) workspace: SplitWorkspace,
}

/// Split an oversized audio file into transcribable segments.
///
/// Probes the duration, computes a [`SplitPlan`], then extracts each segment
/// in plan order. Extraction failures are logged and the index omitted; no
/// retry. The workspace is removed on every exit path, including errors
/// propagated out of probing or planning.
///
/// # Errors
/// - [`SplitError::UnknownDuration`] when the duration probe fails.
/// - [`SplitError::EmptySource`] when the source has zero size.
/// - [`SplitError::NoUsableSegments`] when every extraction failed.
pub async fn split_audio(source: &AudioAsset) -> Result<SplitSegments> {
    let workspace = SplitWorkspace::create()?;

    let total_duration = ffmpeg::probe_duration(&source.path).await;
    let plan = SplitPlan::compute(total_duration, source.size_bytes)?;

    crate::verbose!(
        "Split plan: {:.1}s total, {}s per segment, {} segments",
        plan.total_duration_secs,
        plan.segment_duration_secs,
        plan.segment_count
    );

    let mut segments = Vec::with_capacity(plan.segment_count as usize);

    for index in 0..plan.segment_count {
        let start_secs = index * plan.segment_duration_secs;
        let output = workspace.segment_path(index);

        match ffmpeg::extract_segment(&source.path, start_secs, plan.segment_duration_secs, &output)
            .await
        {
            Ok(()) => {
                let asset = match AudioAsset::from_path(&output) {
                    Ok(asset) => asset,
                    Err(err) => {
                        crate::verbose!("Segment {index} unreadable after extraction: {err}");
                        continue;
                    }
                };
                crate::verbose!(
                    "Extracted segment {} ({:.1} KB)",
                    index,
                    asset.size_bytes as f64 / 1024.0
                );
                segments.push(SegmentAsset { index, asset });
            }
            Err(err) => {
                crate::verbose!("Segment {index} extraction failed: {err}");
            }
        }
    }

    if segments.is_empty() {
        return Err(SplitError::NoUsableSegments.into());
    }

    Ok(SplitSegments {
        segments,
        segment_count: plan.segment_count,
        workspace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_split_fails_on_unprobeable_file() {
        // Not a real audio file, so the duration probe soft-fails to 0.0 and
        // planning must abort.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.wav");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"definitely not audio").unwrap();

        let asset = AudioAsset::from_path(&path).unwrap();
        let err = split_audio(&asset).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<SplitError>(),
            Some(&SplitError::UnknownDuration)
        );
    }

    #[test]
    fn test_dropping_segments_removes_workspace() {
        // SplitSegments owns the workspace guard, so segment files live
        // exactly as long as the value does.
        let workspace = SplitWorkspace::create().unwrap();
        let root = workspace.path().to_path_buf();
        std::fs::write(workspace.segment_path(0), b"pcm").unwrap();
        let split = SplitSegments {
            segments: vec![SegmentAsset {
                index: 0,
                asset: AudioAsset::from_path(&workspace.segment_path(0)).unwrap(),
            }],
            segment_count: 1,
            workspace,
        };
        assert!(root.exists());
        drop(split);
        assert!(!root.exists());
    }

    #[test]
    fn test_segment_assets_keep_plan_indices() {
        // SegmentAsset carries the plan index independent of list position.
        let dir = tempfile::tempdir().unwrap();
        for name in ["segment_000.wav", "segment_002.wav"] {
            std::fs::write(dir.path().join(name), b"pcm").unwrap();
        }
        let segments: Vec<SegmentAsset> = [0u64, 2]
            .iter()
            .map(|&index| SegmentAsset {
                index,
                asset: AudioAsset::from_path(
                    &dir.path().join(format!("segment_{index:03}.wav")),
                )
                .unwrap(),
            })
            .collect();

        assert_eq!(segments[0].index, 0);
        assert_eq!(segments[1].index, 2);
        assert_eq!(
            segments[1].asset.path.file_name().unwrap(),
            "segment_002.wav"
        );
    }
}
