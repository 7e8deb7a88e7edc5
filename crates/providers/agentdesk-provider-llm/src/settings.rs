//! Provider selection from the environment

use agentdesk_core::{get_env_opt, AgentDeskError, Result};
use std::fmt;
use std::str::FromStr;

/// Instructions sent ahead of every question
pub const SYSTEM_PROMPT: &str = "You are an AI assistant answering questions from an operator console.

Answer directly and concisely. Do not show code or describe how you would use tools unless asked.
If you reason through several steps, write the reasoning first and then give the answer on a line
starting with 'FINAL RESPONSE:'.";

pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Supported chat backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Anthropic,
    OpenAi,
    Ollama,
}

impl ProviderKind {
    /// Display label used in the model name
    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "Anthropic",
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Ollama => "Ollama",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "claude-3-5-sonnet-20241022",
            ProviderKind::OpenAi => "gpt-5.3-codex",
            ProviderKind::Ollama => "qwen2.5",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "https://api.anthropic.com/v1",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Ollama => "http://localhost:11434",
        }
    }

    /// Variable holding the API key, for providers that need one
    pub fn key_var(&self) -> Option<&'static str> {
        match self {
            ProviderKind::Anthropic => Some("ANTHROPIC_API_KEY"),
            ProviderKind::OpenAi => Some("OPENAI_API_KEY"),
            ProviderKind::Ollama => None,
        }
    }

    pub fn base_url_var(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "ANTHROPIC_BASE_URL",
            ProviderKind::OpenAi => "OPENAI_BASE_URL",
            ProviderKind::Ollama => "OLLAMA_BASE_URL",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = AgentDeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" => Ok(ProviderKind::Anthropic),
            "openai" => Ok(ProviderKind::OpenAi),
            "ollama" => Ok(ProviderKind::Ollama),
            other => Err(AgentDeskError::config(format!(
                "Unsupported LLM provider: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolved provider configuration
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: ProviderKind,
    pub model: String,
    pub api_key: Option<String>,
    /// Without trailing slash
    pub base_url: String,
    pub max_tokens: u32,
    pub system_prompt: String,
}

impl LlmSettings {
    /// Read `LLM_PROVIDER` (default `ollama`), `LLM_MODEL_ID`, the provider's
    /// key and base URL variables, `LLM_MAX_TOKENS` and `AGENTDESK_SYSTEM_PROMPT`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(get_env_opt)
    }

    /// Same as [`LlmSettings::from_env`] over an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let provider: ProviderKind = lookup("LLM_PROVIDER")
            .unwrap_or_else(|| "ollama".to_string())
            .parse()?;

        let api_key = match provider.key_var() {
            Some(var) => Some(lookup(var).ok_or_else(|| {
                AgentDeskError::config(format!(
                    "Selected {} as provider but {} environment variable is not set.",
                    provider.label(),
                    var
                ))
            })?),
            None => None,
        };

        let model = lookup("LLM_MODEL_ID").unwrap_or_else(|| provider.default_model().to_string());
        let base_url = lookup(provider.base_url_var())
            .unwrap_or_else(|| provider.default_base_url().to_string())
            .trim_end_matches('/')
            .to_string();
        let max_tokens = lookup("LLM_MAX_TOKENS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);
        let system_prompt =
            lookup("AGENTDESK_SYSTEM_PROMPT").unwrap_or_else(|| SYSTEM_PROMPT.to_string());

        Ok(Self {
            provider,
            model,
            api_key,
            base_url,
            max_tokens,
            system_prompt,
        })
    }

    /// e.g. `Ollama (qwen2.5)`
    pub fn model_name(&self) -> String {
        format!("{} ({})", self.provider.label(), self.model)
    }

    pub(crate) fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }
}
