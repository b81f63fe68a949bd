//! LLM analysis of a finished transcript via Azure OpenAI chat completions.
//!
//! Analysis is best-effort by contract: a remote failure is returned as the
//! analysis *text* rather than an error, so the caller still writes both
//! output files and the transcript is never lost to a failed analysis call.

use anyhow::Result;
use serde::Deserialize;

use crate::http::get_http_client;
use crate::provider::azure_openai::base_endpoint;
use crate::settings::{Settings, TRANSCRIPT_PLACEHOLDER};

const ANALYSIS_API_VERSION: &str = "2024-02-15-preview";
const ANALYSIS_TIMEOUT_SECS: u64 = 60;
const ANALYSIS_MAX_TOKENS: u32 = 1000;
const ANALYSIS_TEMPERATURE: f64 = 0.3;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

/// Request an analysis of the transcript from the configured chat deployment.
///
/// Missing configuration is the only hard error; any remote failure is folded
/// into the returned text as `analysis failed: …`.
pub async fn analyze_transcript(transcript: &str, settings: &Settings) -> Result<String> {
    let endpoint = settings
        .service
        .endpoint()
        .ok_or_else(|| anyhow::anyhow!("Azure OpenAI endpoint not configured"))?;
    let api_key = settings
        .service
        .api_key()
        .ok_or_else(|| anyhow::anyhow!("Azure OpenAI API key not configured"))?;

    let url = format!(
        "{}/openai/deployments/{}/chat/completions?api-version={ANALYSIS_API_VERSION}",
        base_endpoint(&endpoint)?,
        settings.service.analysis_deployment
    );

    let user_message = substitute_transcript(&settings.prompts.user_prompt_template, transcript);

    match request_analysis(&url, &api_key, &settings.prompts.system_prompt, &user_message).await {
        Ok(text) => Ok(text),
        Err(err) => {
            crate::verbose!("Analysis request failed: {err:#}");
            Ok(format!("analysis failed: {err:#}"))
        }
    }
}

async fn request_analysis(
    url: &str,
    api_key: &str,
    system_prompt: &str,
    user_message: &str,
) -> Result<String> {
    let client = get_http_client()?;
    let response = client
        .post(url)
        .header("api-key", api_key)
        .json(&serde_json::json!({
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_message}
            ],
            "max_tokens": ANALYSIS_MAX_TOKENS,
            "temperature": ANALYSIS_TEMPERATURE
        }))
        .timeout(std::time::Duration::from_secs(ANALYSIS_TIMEOUT_SECS))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        anyhow::bail!("Analysis API error ({status}): {error_text}");
    }

    let chat_response: ChatResponse = response.json().await?;
    chat_response
        .choices
        .first()
        .map(|c| c.message.content.clone())
        .ok_or_else(|| anyhow::anyhow!("Analysis response contained no choices"))
}

/// Substitute the transcript into the user prompt template.
fn substitute_transcript(template: &str, transcript: &str) -> String {
    template.replace(TRANSCRIPT_PLACEHOLDER, transcript)
}
