//! Web UI for AgentDesk
//!
//! Serves the console page, the server description and the question
//! endpoint the page talks to. The agent and the tool list can be attached
//! after the server is up.

use agentdesk_client::{apply_server_info, PageRenderer, PageView, STYLESHEET};
use agentdesk_core::config::DEFAULT_UI_PORT;
use agentdesk_core::{
    get_env_bool, get_env_int, get_env_opt, get_env_or, summarize, AgentBackend, AskResult, Result,
    ServerInfo, ToolDescriptor,
};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const SERVER_URL_FALLBACK: &str = "Server URL not available";
pub const MODEL_FALLBACK: &str = "Model not available";
pub const NO_QUESTION: &str = "No question provided";
pub const AGENT_NOT_READY: &str = "Agent not ready yet - please wait for authentication to complete";

#[derive(Debug, Clone)]
pub struct WebUiConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    /// MCP server URL shown on the page
    pub server_url: Option<String>,
}

impl Default for WebUiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".into(),
            port: DEFAULT_UI_PORT,
            server_url: None,
        }
    }
}

impl WebUiConfig {
    /// `AGENTDESK_UI_ENABLED`, `AGENTDESK_UI_HOST`, `AGENTDESK_UI_PORT`, `MCP_SERVER_URL`
    pub fn from_env() -> Self {
        Self {
            enabled: get_env_bool("AGENTDESK_UI_ENABLED", true),
            host: get_env_or("AGENTDESK_UI_HOST", "127.0.0.1"),
            port: get_env_int("AGENTDESK_UI_PORT", DEFAULT_UI_PORT),
            server_url: get_env_opt("MCP_SERVER_URL"),
        }
    }
}

#[derive(Clone)]
pub struct WebUiServer {
    pub config: Arc<WebUiConfig>,
    agent: Arc<RwLock<Option<Arc<dyn AgentBackend>>>>,
    tools: Arc<RwLock<Option<Vec<ToolDescriptor>>>>,
    renderer: Arc<PageRenderer>,
}

#[derive(Deserialize)]
struct AskBody {
    #[serde(default)]
    question: String,
}

impl WebUiServer {
    pub fn new(config: WebUiConfig) -> Result<Self> {
        Ok(Self {
            config: Arc::new(config),
            agent: Arc::new(RwLock::new(None)),
            tools: Arc::new(RwLock::new(None)),
            renderer: Arc::new(PageRenderer::new()?),
        })
    }

    /// Start answering `/ask` with this agent
    pub fn attach_agent(&self, agent: Arc<dyn AgentBackend>) {
        tracing::info!("agent attached: {}", agent.model_name());
        *self.agent.write().unwrap_or_else(|e| e.into_inner()) = Some(agent);
    }

    /// Replace the published tool list
    pub fn set_tools(&self, tools: Vec<ToolDescriptor>) {
        tracing::info!("publishing {} tools", tools.len());
        *self.tools.write().unwrap_or_else(|e| e.into_inner()) = Some(tools);
    }

    fn current_agent(&self) -> Option<Arc<dyn AgentBackend>> {
        self.agent.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Body of `GET /server-info`
    pub fn server_info(&self) -> ServerInfo {
        let server_url = self
            .config
            .server_url
            .clone()
            .unwrap_or_else(|| SERVER_URL_FALLBACK.to_string());
        let model_name = self
            .current_agent()
            .map(|a| a.model_name())
            .unwrap_or_else(|| MODEL_FALLBACK.to_string());
        let tools = self
            .tools
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .unwrap_or_default();
        ServerInfo {
            success: true,
            server_url,
            model_name,
            tools: Some(tools),
        }
    }

    /// Run one question through the attached agent
    pub async fn answer(&self, question: &str) -> AskResult {
        let question = question.trim();
        if question.is_empty() {
            return AskResult::failed(NO_QUESTION);
        }
        let Some(agent) = self.current_agent() else {
            tracing::warn!("question received before an agent was attached");
            return AskResult::failed(AGENT_NOT_READY);
        };

        tracing::info!("Processing question: {}", question);
        match agent.run(question).await {
            Ok(messages) => {
                let reply = summarize(&messages);
                tracing::debug!("agent produced {} messages", messages.len());
                AskResult::answered(Some(reply.thinking), reply.response)
            }
            Err(e) => {
                tracing::error!("Agent error: {}", e);
                AskResult::failed(e.to_string())
            }
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/index.html", get(index))
            .route("/styles.css", get(styles))
            .route("/server-info", get(server_info))
            .route("/ask", post(ask))
            .fallback(not_found)
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.clone())
    }

    /// Bind and serve in the background until Ctrl-C.
    ///
    /// Returns the bound address, or `None` when the UI is disabled.
    pub async fn start(&self) -> Result<Option<SocketAddr>> {
        if !self.config.enabled {
            return Ok(None);
        }
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let local = listener.local_addr()?;
        let router = self.router();
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = tokio::signal::ctrl_c().await;
                })
                .await
            {
                tracing::error!("web UI server stopped: {}", e);
            }
        });
        tracing::info!("Web UI listening on http://{}", local);
        Ok(Some(local))
    }
}

async fn index(State(state): State<WebUiServer>) -> Response {
    let mut page = PageView::default();
    apply_server_info(&mut page, &state.server_info());
    match state.renderer.render(&page) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("page render failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn styles() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        STYLESHEET,
    )
}

async fn server_info(State(state): State<WebUiServer>) -> Json<ServerInfo> {
    Json(state.server_info())
}

/// The body is decoded by hand so malformed input still gets a JSON answer
async fn ask(State(state): State<WebUiServer>, body: Bytes) -> Json<AskResult> {
    match serde_json::from_slice::<AskBody>(&body) {
        Ok(req) => Json(state.answer(&req.question).await),
        Err(e) => {
            tracing::warn!("bad /ask body: {}", e);
            Json(AskResult::failed(e.to_string()))
        }
    }
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdesk_core::{AgentDeskError, AgentMessage};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    struct EchoAgent;

    #[async_trait]
    impl AgentBackend for EchoAgent {
        fn model_name(&self) -> String {
            "Echo (test)".into()
        }

        async fn run(&self, question: &str) -> Result<Vec<AgentMessage>> {
            if question == "fail" {
                return Err(AgentDeskError::provider("model offline"));
            }
            Ok(vec![
                AgentMessage::user(question),
                AgentMessage::assistant(format!("FINAL RESPONSE: echo {}", question)),
            ])
        }
    }

    fn server() -> WebUiServer {
        WebUiServer::new(WebUiConfig::default()).expect("server")
    }

    async fn body_string(resp: Response) -> String {
        let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf8")
    }

    async fn post_ask(router: Router, body: &'static str) -> AskResult {
        let req = Request::post("/ask")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("request");
        let resp = router.oneshot(req).await.expect("response");
        assert_eq!(resp.status(), StatusCode::OK);
        serde_json::from_str(&body_string(resp).await).expect("ask result")
    }

    #[tokio::test]
    async fn test_server_info_fallbacks() {
        let resp = server()
            .router()
            .oneshot(Request::get("/server-info").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let info: ServerInfo = serde_json::from_str(&body_string(resp).await).unwrap();
        assert!(info.success);
        assert_eq!(info.server_url, SERVER_URL_FALLBACK);
        assert_eq!(info.model_name, MODEL_FALLBACK);
        assert_eq!(info.tools, Some(vec![]));
    }

    #[tokio::test]
    async fn test_server_info_after_attach() {
        let s = WebUiServer::new(WebUiConfig {
            server_url: Some("http://mcp.local/mcp".into()),
            ..Default::default()
        })
        .unwrap();
        s.attach_agent(Arc::new(EchoAgent));
        s.set_tools(vec![ToolDescriptor::named("search")]);

        let info = s.server_info();
        assert_eq!(info.server_url, "http://mcp.local/mcp");
        assert_eq!(info.model_name, "Echo (test)");
        assert_eq!(info.tools.unwrap()[0].name.as_deref(), Some("search"));
    }

    #[tokio::test]
    async fn test_ask_before_agent_is_ready() {
        let result = post_ask(server().router(), r#"{"question": "hi"}"#).await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(AGENT_NOT_READY));
    }

    #[tokio::test]
    async fn test_ask_blank_and_malformed() {
        let s = server();
        s.attach_agent(Arc::new(EchoAgent));

        let result = post_ask(s.router(), r#"{"question": "   "}"#).await;
        assert_eq!(result.error.as_deref(), Some(NO_QUESTION));

        let result = post_ask(s.router(), "{}").await;
        assert_eq!(result.error.as_deref(), Some(NO_QUESTION));

        let result = post_ask(s.router(), "not json").await;
        assert!(!result.success);
        assert!(result.error.is_some());
    }

    #[tokio::test]
    async fn test_ask_summarizes_agent_trace() {
        let s = server();
        s.attach_agent(Arc::new(EchoAgent));

        let result = post_ask(s.router(), r#"{"question": " ping "}"#).await;

        assert!(result.success);
        assert_eq!(result.response, "echo ping");
        assert_eq!(result.thinking.as_deref(), Some("User: ping"));
    }

    #[tokio::test]
    async fn test_ask_agent_error() {
        let s = server();
        s.attach_agent(Arc::new(EchoAgent));
        let result = post_ask(s.router(), r#"{"question": "fail"}"#).await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Provider error: model offline"));
    }

    #[tokio::test]
    async fn test_index_and_styles() {
        let s = server();
        s.set_tools(vec![ToolDescriptor::named("search")]);

        let resp = s
            .router()
            .oneshot(Request::get("/index.html").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_string(resp).await;
        assert!(html.contains("toggleTool('tool-0')"));
        assert!(html.contains(MODEL_FALLBACK));

        let resp = s
            .router()
            .oneshot(Request::get("/styles.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.headers()[header::CACHE_CONTROL], "public, max-age=3600");
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/css");
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let resp = server()
            .router()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(resp).await, "Not found");
    }

    #[tokio::test]
    async fn test_cors_header() {
        let resp = server()
            .router()
            .oneshot(
                Request::get("/server-info")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
