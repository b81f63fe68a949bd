//! Azure OpenAI audio transcription backend.
//!
//! Talks to an `audio/transcriptions` deployment with the multipart upload
//! format: `file` part plus optional `language` hint, authenticated with the
//! `api-key` header.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::{DEFAULT_TIMEOUT_SECS, TranscriptionBackend, TranscriptionRequest, TranscriptionResult};

const TRANSCRIPTION_API_VERSION: &str = "2024-06-01";

/// Response structure of the transcriptions endpoint
#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Transcription backend for an Azure OpenAI deployment.
#[derive(Debug, Clone)]
pub struct AzureOpenAiBackend {
    endpoint: String,
    api_key: String,
    deployment: String,
}

impl AzureOpenAiBackend {
    pub fn new(endpoint: String, api_key: String, deployment: String) -> Self {
        Self {
            endpoint,
            api_key,
            deployment,
        }
    }

    fn transcription_url(&self) -> Result<String> {
        let base = base_endpoint(&self.endpoint)?;
        Ok(format!(
            "{base}/openai/deployments/{}/audio/transcriptions?api-version={TRANSCRIPTION_API_VERSION}",
            self.deployment
        ))
    }
}

#[async_trait]
impl TranscriptionBackend for AzureOpenAiBackend {
    fn name(&self) -> &'static str {
        "azure-openai"
    }

    async fn transcribe(
        &self,
        client: &reqwest::Client,
        request: TranscriptionRequest,
    ) -> Result<TranscriptionResult> {
        let url = self.transcription_url()?;

        let mut form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(request.audio_data)
                    .file_name(request.filename)
                    .mime_str(&request.mime_type)?,
            )
            .text("response_format", "json");

        if let Some(lang) = request.language {
            form = form.text("language", lang);
        }

        let response = client
            .post(&url)
            .header("api-key", &self.api_key)
            .multipart(form)
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .send()
            .await
            .context("Failed to send transcription request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Transcription API error ({status}): {error_text}");
        }

        let text = response
            .text()
            .await
            .context("Failed to get response text")?;
        let resp: TranscriptionResponse =
            serde_json::from_str(&text).context("Failed to parse transcription response")?;

        Ok(TranscriptionResult { text: resp.text })
    }
}

/// Normalize a configured endpoint into the resource base URL.
///
/// Accepts either the bare resource URL or a full deployment URL copied from
/// the portal; anything from `/openai/deployments` onward is stripped, as are
/// trailing slashes.
pub(crate) fn base_endpoint(endpoint: &str) -> Result<&str> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        anyhow::bail!("Azure OpenAI endpoint not configured");
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        anyhow::bail!(
            "Invalid Azure OpenAI endpoint: must start with http:// or https://\n\
             Got: {trimmed}\n\
             Example: https://my-resource.openai.azure.com"
        );
    }

    let base = match trimmed.find("/openai/deployments") {
        Some(pos) => &trimmed[..pos],
        None => trimmed,
    };
    Ok(base.trim_end_matches('/'))
}
