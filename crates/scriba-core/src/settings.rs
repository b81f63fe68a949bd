//! Settings management with JSON file persistence and env var fallbacks.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an assistant that analyzes meeting transcripts. \
Summarize the key points, decisions, and action items. \
Be concise and keep the original language of the transcript.";

pub const DEFAULT_USER_PROMPT_TEMPLATE: &str =
    "Analyze the following transcript:\n\n{transcript}";

/// Placeholder in the user prompt template that is replaced with the
/// transcript text.
pub const TRANSCRIPT_PLACEHOLDER: &str = "{transcript}";

/// Application settings, loaded once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub service: ServiceSettings,

    #[serde(default)]
    pub transcription: TranscriptionSettings,

    #[serde(default)]
    pub prompts: PromptSettings,
}

/// Azure OpenAI service connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Resource endpoint, e.g. https://my-resource.openai.azure.com
    #[serde(default)]
    pub endpoint: String,

    /// API key (falls back to AZURE_OPENAI_API_KEY if empty)
    #[serde(default)]
    pub api_key: String,

    /// Deployment name for audio transcriptions
    #[serde(default)]
    pub transcription_deployment: String,

    /// Deployment name for chat-completion analysis
    #[serde(default)]
    pub analysis_deployment: String,
}

impl ServiceSettings {
    /// Get the endpoint, falling back to the AZURE_OPENAI_ENDPOINT env var.
    pub fn endpoint(&self) -> Option<String> {
        value_or_env(&self.endpoint, "AZURE_OPENAI_ENDPOINT")
    }

    /// Get the API key, falling back to the AZURE_OPENAI_API_KEY env var.
    pub fn api_key(&self) -> Option<String> {
        value_or_env(&self.api_key, "AZURE_OPENAI_API_KEY")
    }
}

fn value_or_env(value: &str, env_var: &str) -> Option<String> {
    if !value.trim().is_empty() {
        return Some(value.trim().to_string());
    }
    std::env::var(env_var).ok().filter(|v| !v.trim().is_empty())
}

/// Transcription behavior settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptionSettings {
    /// Language hint sent to the transcription service (None = auto-detect)
    #[serde(default)]
    pub language: Option<String>,
}

/// Prompts used for the transcript analysis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSettings {
    pub system_prompt: String,

    /// User message template; `{transcript}` is replaced with the full
    /// transcript text.
    pub user_prompt_template: String,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            user_prompt_template: DEFAULT_USER_PROMPT_TEMPLATE.to_string(),
        }
    }
}

impl Settings {
    /// Default settings file location: `<config_dir>/scriba/settings.json`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scriba").join("settings.json"))
    }

    /// Load settings from an explicit path, the default location, or defaults.
    ///
    /// An explicit path must exist; the default location is optional and a
    /// missing file falls back to `Settings::default()` (env vars can still
    /// supply the service values).
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load_from(path);
        }

        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Check that every value required before any network call is present.
    ///
    /// # Errors
    /// Returns a descriptive error naming the first missing value.
    pub fn validate(&self) -> Result<()> {
        if self.service.endpoint().is_none() {
            anyhow::bail!(
                "Azure OpenAI endpoint not configured. \
                 Set service.endpoint in the settings file or the AZURE_OPENAI_ENDPOINT environment variable."
            );
        }
        if self.service.api_key().is_none() {
            anyhow::bail!(
                "Azure OpenAI API key not configured. \
                 Set service.api_key in the settings file or the AZURE_OPENAI_API_KEY environment variable."
            );
        }
        if self.service.transcription_deployment.trim().is_empty() {
            anyhow::bail!("Transcription deployment name not configured (service.transcription_deployment).");
        }
        if self.service.analysis_deployment.trim().is_empty() {
            anyhow::bail!("Analysis deployment name not configured (service.analysis_deployment).");
        }
        if self.prompts.system_prompt.trim().is_empty() {
            anyhow::bail!("Analysis system prompt is empty (prompts.system_prompt).");
        }
        if self.prompts.user_prompt_template.trim().is_empty() {
            anyhow::bail!("Analysis user prompt template is empty (prompts.user_prompt_template).");
        }
        if !self
            .prompts
            .user_prompt_template
            .contains(TRANSCRIPT_PLACEHOLDER)
        {
            anyhow::bail!(
                "Analysis user prompt template must contain the {TRANSCRIPT_PLACEHOLDER} placeholder."
            );
        }
        Ok(())
    }

    /// Write a starter settings file with default prompts and empty service
    /// values to fill in.
    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(&Settings::default())
            .context("Failed to serialize default settings")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Settings {
        Settings {
            service: ServiceSettings {
                endpoint: "https://res.openai.azure.com".to_string(),
                api_key: "key".to_string(),
                transcription_deployment: "gpt-4o-transcribe".to_string(),
                analysis_deployment: "gpt-4o".to_string(),
            },
            ..Settings::default()
        }
    }

    #[test]
    fn test_validate_accepts_configured_settings() {
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn test_validate_flags_missing_deployments() {
        let mut settings = configured();
        settings.service.transcription_deployment.clear();
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("transcription_deployment"));

        let mut settings = configured();
        settings.service.analysis_deployment = "  ".to_string();
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("analysis_deployment"));
    }

    #[test]
    fn test_validate_flags_bad_prompt_template() {
        let mut settings = configured();
        settings.prompts.user_prompt_template = "no placeholder here".to_string();
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("{transcript}"));
    }

    #[test]
    fn test_default_prompts_ship_working_template() {
        let settings = Settings::default();
        assert!(!settings.prompts.system_prompt.is_empty());
        assert!(
            settings
                .prompts
                .user_prompt_template
                .contains(TRANSCRIPT_PLACEHOLDER)
        );
    }

    #[test]
    fn test_load_explicit_missing_path_fails() {
        assert!(Settings::load(Some(Path::new("/nonexistent/settings.json"))).is_err());
    }

    #[test]
    fn test_load_parses_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"service": {"endpoint": "https://res.openai.azure.com"}}"#,
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.service.endpoint, "https://res.openai.azure.com");
        // omitted sections fall back to defaults
        assert!(settings.prompts.user_prompt_template.contains("{transcript}"));
        assert!(settings.transcription.language.is_none());
    }

    #[test]
    fn test_write_template_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        Settings::write_template(&path).unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert!(settings.service.endpoint.is_empty());
        assert_eq!(settings.prompts.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }
}
