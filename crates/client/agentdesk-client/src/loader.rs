//! Populates the server, model and tools regions from `GET /server-info`

use crate::session::ConsoleSession;
use crate::tools::{render_tools, ToolsPanel};
use crate::transport::BackendTransport;
use crate::view::PageView;
use agentdesk_core::ServerInfo;

pub const SERVER_URL_UNAVAILABLE: &str = "Server URL not available";
pub const MODEL_UNAVAILABLE: &str = "Model info not available";
pub const SERVER_URL_LOAD_FAILED: &str = "Error loading server info";
pub const MODEL_LOAD_FAILED: &str = "Error loading model info";

/// Write a server-info reply into the page
pub fn apply_server_info(page: &mut PageView, info: &ServerInfo) {
    if info.success {
        page.server_url = info.server_url.clone();
        page.model_name = info.model_name.clone();
        page.tools = render_tools(info.tools.as_deref());
    } else {
        page.server_url = SERVER_URL_UNAVAILABLE.to_string();
        page.model_name = MODEL_UNAVAILABLE.to_string();
        page.tools = ToolsPanel::Unavailable;
    }
}

/// Mark the three regions as failed to load
pub fn apply_load_failure(page: &mut PageView) {
    page.server_url = SERVER_URL_LOAD_FAILED.to_string();
    page.model_name = MODEL_LOAD_FAILED.to_string();
    page.tools = ToolsPanel::LoadFailed;
}

impl<T: BackendTransport> ConsoleSession<T> {
    /// Fetch server info once and render it. Failures are shown in the
    /// page, never returned.
    pub async fn load_server_info(&self) {
        match self.transport.server_info().await {
            Ok(info) => {
                tracing::debug!(
                    "server info: success={}, tools={}",
                    info.success,
                    info.tools.as_ref().map_or(0, Vec::len)
                );
                self.view.update(|p| apply_server_info(p, &info));
            }
            Err(err) => {
                tracing::error!("Error loading server info: {}", err);
                self.view.update(apply_load_failure);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{NO_TOOLS, TOOLS_LOAD_FAILED, TOOLS_UNAVAILABLE, UNNAMED_TOOL};
    use crate::transport::MockBackendTransport;
    use crate::view::ViewBindings;
    use agentdesk_core::{AgentDeskError, ToolDescriptor};

    #[tokio::test]
    async fn test_load_success_renders_tools() {
        let mut mock = MockBackendTransport::new();
        mock.expect_server_info().times(1).returning(|| {
            Ok(ServerInfo {
                success: true,
                server_url: "http://mcp.local/mcp".into(),
                model_name: "Ollama (llama3.1)".into(),
                tools: Some(vec![ToolDescriptor::named("search"), ToolDescriptor::named("fetch")]),
            })
        });
        let session = ConsoleSession::new(mock, ViewBindings::new());

        session.load_server_info().await;

        let page = session.view().snapshot();
        assert_eq!(page.server_url, "http://mcp.local/mcp");
        assert_eq!(page.model_name, "Ollama (llama3.1)");
        let names: Vec<_> = page.tools.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["search", "fetch"]);
    }

    #[tokio::test]
    async fn test_load_success_with_null_fields() {
        let mut mock = MockBackendTransport::new();
        mock.expect_server_info().times(1).returning(|| {
            Ok(serde_json::from_str(
                r#"{"success":true,"serverUrl":null,"modelName":null,"tools":[{"name":"search"},7]}"#,
            )?)
        });
        let session = ConsoleSession::new(mock, ViewBindings::new());

        session.load_server_info().await;

        let page = session.view().snapshot();
        assert_eq!(page.server_url, "");
        assert_eq!(page.model_name, "");
        let names: Vec<_> = page.tools.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["search", UNNAMED_TOOL]);
    }

    #[tokio::test]
    async fn test_load_success_without_tools() {
        let mut mock = MockBackendTransport::new();
        mock.expect_server_info().returning(|| {
            Ok(ServerInfo {
                success: true,
                ..Default::default()
            })
        });
        let session = ConsoleSession::new(mock, ViewBindings::new());
        session.load_server_info().await;
        assert_eq!(session.view().snapshot().tools.placeholder(), Some(NO_TOOLS));
    }

    #[tokio::test]
    async fn test_load_reported_failure() {
        let mut mock = MockBackendTransport::new();
        mock.expect_server_info().returning(|| Ok(ServerInfo::default()));
        let session = ConsoleSession::new(mock, ViewBindings::new());

        session.load_server_info().await;

        let page = session.view().snapshot();
        assert_eq!(page.server_url, SERVER_URL_UNAVAILABLE);
        assert_eq!(page.model_name, MODEL_UNAVAILABLE);
        assert_eq!(page.tools.placeholder(), Some(TOOLS_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_load_transport_failure() {
        let mut mock = MockBackendTransport::new();
        mock.expect_server_info()
            .returning(|| Err(AgentDeskError::transport("connection refused")));
        let session = ConsoleSession::new(mock, ViewBindings::new());

        session.load_server_info().await;

        let page = session.view().snapshot();
        assert_eq!(page.server_url, SERVER_URL_LOAD_FAILED);
        assert_eq!(page.model_name, MODEL_LOAD_FAILED);
        assert_eq!(page.tools.placeholder(), Some(TOOLS_LOAD_FAILED));
    }
}
