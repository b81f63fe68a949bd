//! Whole-file vs split dispatch and ordered segment aggregation.

use anyhow::{Context, Result};

use crate::asset::AudioAsset;
use crate::http::get_http_client;
use crate::provider::{TranscriptionBackend, TranscriptionRequest};
use crate::split::{SplitSegments, split_audio};

/// Largest file sent to the service in one request. Anything bigger is split.
pub const MAX_WHOLE_FILE_BYTES: u64 = 25 * 1024 * 1024;

/// Transcribe an audio file, splitting it first when it exceeds the
/// whole-file upload ceiling.
///
/// This is the only place that inspects the file size. Files at or under
/// [`MAX_WHOLE_FILE_BYTES`] go up in a single request; larger files are
/// split into segments which are transcribed one at a time and joined into
/// one labeled transcript.
pub async fn transcribe_file(
    backend: &dyn TranscriptionBackend,
    asset: &AudioAsset,
    language: Option<&str>,
) -> Result<String> {
    let client = get_http_client()?;

    if asset.size_bytes <= MAX_WHOLE_FILE_BYTES {
        crate::verbose!(
            "Transcribing {} ({:.1} MB) in one request via {}",
            asset.path.display(),
            asset.size_bytes as f64 / (1024.0 * 1024.0),
            backend.name()
        );
        let request = TranscriptionRequest::from_asset(asset, language).await?;
        let result = backend
            .transcribe(client, request)
            .await
            .context("Transcription failed")?;
        return Ok(result.text);
    }

    crate::verbose!(
        "{} is {:.1} MB, over the {} MB ceiling; splitting",
        asset.path.display(),
        asset.size_bytes as f64 / (1024.0 * 1024.0),
        MAX_WHOLE_FILE_BYTES / (1024 * 1024)
    );

    let split = split_audio(asset).await?;
    Ok(aggregate_segments(backend, client, &split, language).await)
}

/// Transcribe every extracted segment in plan order and join the results.
///
/// One block is emitted per surviving segment, labeled with its 1-based plan
/// index over the planned total, so extraction gaps stay visible. A failed
/// transcription becomes an inline `[processing error: …]` marker instead of
/// aborting the remaining segments; this function always completes.
async fn aggregate_segments(
    backend: &dyn TranscriptionBackend,
    client: &reqwest::Client,
    split: &SplitSegments,
    language: Option<&str>,
) -> String {
    let total = split.segment_count;
    let mut blocks = Vec::with_capacity(split.segments.len());

    for segment in &split.segments {
        let label = segment.index + 1;
        crate::verbose!("Transcribing segment {label}/{total}");

        match transcribe_segment(backend, client, &segment.asset, language).await {
            Ok(text) => blocks.push(format!("=== segment {label}/{total} ===\n{text}")),
            Err(err) => {
                crate::verbose!("Segment {label}/{total} failed: {err:#}");
                blocks.push(format!(
                    "=== segment {label}/{total} ===\n[processing error: {err:#}]"
                ));
            }
        }
    }

    blocks.join("\n\n")
}

async fn transcribe_segment(
    backend: &dyn TranscriptionBackend,
    client: &reqwest::Client,
    asset: &AudioAsset,
    language: Option<&str>,
) -> Result<String> {
    let request = TranscriptionRequest::from_asset(asset, language).await?;
    let result = backend.transcribe(client, request).await?;
    Ok(result.text)
}
