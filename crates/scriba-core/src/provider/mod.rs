//! Transcription backend seam.
//!
//! The pipeline code only ever talks to [`TranscriptionBackend`]; the Azure
//! OpenAI implementation is [`AzureOpenAiBackend`]. Tests substitute mock
//! backends through the same trait.

pub(crate) mod azure_openai;

pub use azure_openai::AzureOpenAiBackend;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::asset::AudioAsset;

/// Timeout for audio upload requests. Segment uploads run up to 20 MiB, so
/// this is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// One audio payload ready to send to a transcription service.
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    pub audio_data: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
    pub language: Option<String>,
}

impl TranscriptionRequest {
    /// Load an asset's bytes from disk and pair them with its upload metadata.
    pub async fn from_asset(asset: &AudioAsset, language: Option<&str>) -> Result<Self> {
        let audio_data = tokio::fs::read(&asset.path)
            .await
            .with_context(|| format!("Failed to read audio file: {}", asset.path.display()))?;

        Ok(Self {
            audio_data,
            filename: asset.file_name(),
            mime_type: asset.mime_type.clone(),
            language: language.map(|s| s.to_string()),
        })
    }
}

/// Result of a transcription call.
#[derive(Debug, Clone)]
pub struct TranscriptionResult {
    pub text: String,
}

/// A remote transcription service.
///
/// Implementations propagate remote failures as errors and never retry;
/// failure handling policy lives with the callers.
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn transcribe(
        &self,
        client: &reqwest::Client,
        request: TranscriptionRequest,
    ) -> Result<TranscriptionResult>;
}
