use agentdesk_core::{SchemaValue, ToolSource};
use agentdesk_provider_mcp::{McpToolCatalog, SESSION_HEADER};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Seen {
    methods: Vec<String>,
    sessions: Vec<Option<String>>,
    auth: Vec<Option<String>>,
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn handle(seen: Arc<Mutex<Seen>>, headers: HeaderMap, Json(msg): Json<Value>) -> Response {
    let method = msg["method"].as_str().unwrap_or_default().to_string();
    {
        let mut seen = seen.lock().unwrap();
        seen.methods.push(method.clone());
        seen.sessions.push(header(&headers, SESSION_HEADER));
        seen.auth.push(header(&headers, "authorization"));
    }
    let id = msg["id"].clone();
    match method.as_str() {
        "initialize" => (
            [(SESSION_HEADER, "session-1")],
            Json(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "protocolVersion": "2025-03-26",
                    "capabilities": {"tools": {}},
                    "serverInfo": {"name": "mock", "version": "0"}
                }
            })),
        )
            .into_response(),
        "notifications/initialized" => StatusCode::ACCEPTED.into_response(),
        "tools/list" if msg["params"]["cursor"].is_null() => Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": {
                "tools": [{
                    "name": "search_metrics",
                    "description": "Search metrics",
                    "inputSchema": {"type": "object"}
                }],
                "nextCursor": "2"
            }
        }))
        .into_response(),
        "tools/list" => {
            let reply = json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {"tools": [{"name": "ask_question"}]}
            });
            (
                [(header::CONTENT_TYPE, "text/event-stream")],
                format!("event: message\ndata: {}\n\n", reply),
            )
                .into_response()
        }
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn start_mock(seen: Arc<Mutex<Seen>>) -> String {
    let app = Router::new().route(
        "/mcp",
        post(move |headers: HeaderMap, body: Json<Value>| handle(seen.clone(), headers, body)),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/mcp", addr)
}

#[tokio::test]
async fn lists_tools_across_pages() {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let url = start_mock(seen.clone()).await;
    let catalog = McpToolCatalog::new(url, Some("secret".into()));

    let tools = catalog.list_tools().await.unwrap();

    let names: Vec<_> = tools.iter().filter_map(|t| t.name.as_deref()).collect();
    assert_eq!(names, ["search_metrics", "ask_question"]);
    assert!(matches!(tools[0].args_schema, Some(SchemaValue::Structured(_))));

    let seen = seen.lock().unwrap();
    assert_eq!(
        seen.methods,
        ["initialize", "notifications/initialized", "tools/list", "tools/list"]
    );
    assert_eq!(seen.sessions[0], None);
    assert!(seen.sessions[1..]
        .iter()
        .all(|s| s.as_deref() == Some("session-1")));
    assert!(seen.auth.iter().all(|a| a.as_deref() == Some("Bearer secret")));
}

#[tokio::test]
async fn http_error_is_reported() {
    let app = Router::new().route(
        "/mcp",
        post(|| async { (StatusCode::UNAUTHORIZED, "missing token") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let catalog = McpToolCatalog::new(format!("http://{}/mcp", addr), None);
    let err = catalog.list_tools().await.unwrap_err();
    assert!(err.to_string().contains("401"), "{}", err);
}
