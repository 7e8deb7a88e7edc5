//! Chat model backends for AgentDesk
//!
//! One [`ChatAgent`] per process, configured from the environment through
//! [`LlmSettings`]. Each question is a single round trip to the selected
//! provider; the reply becomes a two-message trace (question, answer).

#![warn(clippy::all)]

mod anthropic;
mod ollama;
mod openai;
pub mod settings;

pub use settings::{LlmSettings, ProviderKind, SYSTEM_PROMPT};

use agentdesk_core::{AgentBackend, AgentDeskError, AgentMessage, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::sync::OnceLock;
use std::time::Duration;

/// Shared HTTP client for connection pooling
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

fn http_client() -> Client {
    HTTP_CLIENT
        .get_or_init(|| {
            Client::builder()
                .pool_idle_timeout(Duration::from_secs(300))
                .tcp_keepalive(Duration::from_secs(60))
                .connect_timeout(Duration::from_secs(10))
                .timeout(Duration::from_secs(300))
                .build()
                .unwrap_or_else(|e| {
                    tracing::warn!("falling back to default HTTP client: {}", e);
                    Client::new()
                })
        })
        .clone()
}

/// Send a JSON request; non-2xx answers become [`AgentDeskError::UpstreamStatus`]
pub(crate) async fn send_json(provider: &str, req: RequestBuilder) -> Result<serde_json::Value> {
    let resp = req.send().await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp
            .text()
            .await
            .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
        return Err(AgentDeskError::upstream_status(provider, status.as_u16(), body));
    }
    Ok(resp.json().await?)
}

/// Model-only agent: answers from the configured chat model
pub struct ChatAgent {
    settings: LlmSettings,
    client: Client,
}

impl ChatAgent {
    pub fn new(settings: LlmSettings) -> Self {
        tracing::info!("Creating {} chat agent with model {}", settings.provider, settings.model);
        Self {
            settings,
            client: http_client(),
        }
    }

    /// Build from `LLM_*` environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(LlmSettings::from_env()?))
    }

    pub fn settings(&self) -> &LlmSettings {
        &self.settings
    }

    async fn complete(&self, question: &str) -> Result<String> {
        match self.settings.provider {
            ProviderKind::Anthropic => anthropic::complete(&self.client, &self.settings, question).await,
            ProviderKind::OpenAi => openai::complete(&self.client, &self.settings, question).await,
            ProviderKind::Ollama => ollama::complete(&self.client, &self.settings, question).await,
        }
    }
}

#[async_trait]
impl AgentBackend for ChatAgent {
    fn model_name(&self) -> String {
        self.settings.model_name()
    }

    async fn run(&self, question: &str) -> Result<Vec<AgentMessage>> {
        let started = std::time::Instant::now();
        let reply = self.complete(question).await?;
        tracing::debug!(
            "{} answered in {} ms ({} chars)",
            self.settings.provider,
            started.elapsed().as_millis(),
            reply.len()
        );
        Ok(vec![AgentMessage::user(question), AgentMessage::assistant(reply)])
    }
}
