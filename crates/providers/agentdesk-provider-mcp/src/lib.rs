//! MCP tool catalogue
//!
//! Lists the tools an MCP server exposes, over the streamable HTTP
//! transport: `initialize`, `notifications/initialized`, then `tools/list`
//! until the server stops returning a cursor. The tools are only listed for
//! display; nothing here calls them.

#![warn(clippy::all)]

pub mod rpc;

use agentdesk_core::{AgentDeskError, McpSettings, Result, ToolDescriptor, ToolSource};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const SESSION_HEADER: &str = "Mcp-Session-Id";
const PROTOCOL_HEADER: &str = "MCP-Protocol-Version";
const MAX_PAGES: usize = 100;

/// `tools/list` client for one MCP endpoint
pub struct McpToolCatalog {
    client: Client,
    endpoint: String,
    bearer_token: Option<String>,
    next_id: AtomicU64,
}

impl McpToolCatalog {
    pub fn new(endpoint: impl Into<String>, bearer_token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("falling back to default HTTP client: {}", e);
                Client::new()
            });
        Self {
            client,
            endpoint: endpoint.into(),
            bearer_token,
            next_id: AtomicU64::new(1),
        }
    }

    /// `None` when no server URL is configured
    pub fn from_settings(settings: &McpSettings) -> Option<Self> {
        settings
            .server_url
            .as_ref()
            .map(|url| Self::new(url.clone(), settings.bearer_token.clone()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, session: Option<&str>, message: &Value) -> Result<Response> {
        let mut req = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json, text/event-stream")
            .json(message);
        if let Some(session) = session {
            req = req
                .header(SESSION_HEADER, session)
                .header(PROTOCOL_HEADER, rpc::PROTOCOL_VERSION);
        }
        if let Some(token) = &self.bearer_token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AgentDeskError::upstream_status("mcp", status.as_u16(), body));
        }
        Ok(resp)
    }

    /// Send one request; returns its result and the session id the server
    /// assigned, if any
    async fn call(
        &self,
        session: Option<&str>,
        method: &str,
        params: Value,
    ) -> Result<(Value, Option<String>)> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("MCP -> {} (id {})", method, id);
        let resp = self.post(session, &rpc::request(id, method, params)).await?;
        let assigned = resp
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_string();
        let body = resp.text().await?;
        let result = rpc::response_result(&content_type, &body, id)?;
        Ok((result, assigned))
    }

    /// Fetch every page of the tool list
    pub async fn fetch_tools(&self) -> Result<Vec<ToolDescriptor>> {
        let (init, session) = self
            .call(
                None,
                "initialize",
                rpc::initialize_params(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            )
            .await?;
        tracing::info!(
            "MCP session initialized with {} (protocol {})",
            init.pointer("/serverInfo/name")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown server"),
            init.get("protocolVersion")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("?")
        );
        let session = session.as_deref();

        self.post(session, &rpc::notification("notifications/initialized"))
            .await?;

        let mut tools = Vec::new();
        let mut cursor: Option<String> = None;
        for _ in 0..MAX_PAGES {
            let (result, _) = self
                .call(session, "tools/list", rpc::list_tools_params(cursor.as_deref()))
                .await?;
            let page = rpc::tools_page(&result);
            tools.extend(page.tools);
            match page.next_cursor {
                Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
                _ => return Ok(tools),
            }
        }
        tracing::warn!("MCP tool list truncated after {} pages", MAX_PAGES);
        Ok(tools)
    }
}

#[async_trait]
impl ToolSource for McpToolCatalog {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>> {
        self.fetch_tools().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_requires_url() {
        assert!(McpToolCatalog::from_settings(&McpSettings::default()).is_none());
        let catalog = McpToolCatalog::from_settings(&McpSettings {
            server_url: Some("http://localhost:9000/mcp".into()),
            bearer_token: Some("t".into()),
        })
        .unwrap();
        assert_eq!(catalog.endpoint(), "http://localhost:9000/mcp");
    }
}
