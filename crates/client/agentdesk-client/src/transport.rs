//! How the console reaches its backend

use agentdesk_core::{AgentDeskError, AskRequest, AskResult, Result, ServerInfo};
use async_trait::async_trait;
use reqwest::Client;

/// Request/response exchange with the backend.
///
/// Any `Err` is a transport failure: the request was rejected, the network
/// was unreachable, or the body did not decode.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendTransport: Send + Sync {
    /// `GET /server-info`
    async fn server_info(&self) -> Result<ServerInfo>;

    /// `POST /ask`
    async fn ask(&self, request: &AskRequest) -> Result<AskResult>;
}

/// reqwest-backed transport against a base URL such as `http://localhost:8001`
///
/// HTTP status codes are not interpreted; only the body is.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport with a default client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a transport reusing an existing client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl BackendTransport for HttpTransport {
    async fn server_info(&self) -> Result<ServerInfo> {
        let url = self.url("server-info");
        tracing::debug!("GET {}", url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.json::<ServerInfo>().await?)
    }

    async fn ask(&self, request: &AskRequest) -> Result<AskResult> {
        let url = self.url("ask");
        tracing::debug!("POST {} ({} chars)", url, request.question.len());
        let resp = self.client.post(&url).json(request).send().await?;
        Ok(resp.json::<AskResult>().await?)
    }
}

/// Short description of a transport failure for display
pub fn describe_failure(err: &AgentDeskError) -> String {
    match err {
        AgentDeskError::Network(e) => e.to_string(),
        AgentDeskError::Transport(msg) => msg.clone(),
        other => other.to_string(),
    }
}
