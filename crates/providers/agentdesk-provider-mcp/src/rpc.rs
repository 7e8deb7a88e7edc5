//! JSON-RPC framing for MCP over streamable HTTP

use agentdesk_core::{AgentDeskError, Result, SchemaValue, ToolDescriptor};
use serde_json::{json, Value};

pub const PROTOCOL_VERSION: &str = "2025-03-26";

/// A request expecting a response
pub fn request(id: u64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    })
}

/// A notification (no id, no response)
pub fn notification(method: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": method,
    })
}

pub fn initialize_params(client_name: &str, client_version: &str) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {},
        "clientInfo": {
            "name": client_name,
            "version": client_version,
        },
    })
}

pub fn list_tools_params(cursor: Option<&str>) -> Value {
    match cursor {
        Some(cursor) => json!({ "cursor": cursor }),
        None => json!({}),
    }
}

/// Payloads of every `data:` event in an SSE body
pub fn sse_events(body: &str) -> Vec<String> {
    let mut events = Vec::new();
    let mut data: Vec<&str> = Vec::new();
    for line in body.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            if !data.is_empty() {
                events.push(data.join("\n"));
                data.clear();
            }
            continue;
        }
        if let Some(rest) = line.strip_prefix("data:") {
            data.push(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }
    if !data.is_empty() {
        events.push(data.join("\n"));
    }
    events
}

/// Find the response to request `id` in a JSON or SSE body and unwrap its
/// `result`
pub fn response_result(content_type: &str, body: &str, id: u64) -> Result<Value> {
    let message = if content_type.contains("text/event-stream") {
        sse_events(body)
            .iter()
            .filter_map(|e| serde_json::from_str::<Value>(e).ok())
            .find(|m| m.get("id").and_then(Value::as_u64) == Some(id))
            .ok_or_else(|| {
                AgentDeskError::mcp(format!("no response for request {} in event stream", id))
            })?
    } else {
        serde_json::from_str::<Value>(body)?
    };
    unwrap_result(message)
}

fn unwrap_result(mut message: Value) -> Result<Value> {
    if let Some(error) = message.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
        let text = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(AgentDeskError::mcp(format!("{} (code {})", text, code)));
    }
    match message.get_mut("result") {
        Some(result) => Ok(result.take()),
        None => Err(AgentDeskError::mcp("response carries neither result nor error")),
    }
}

/// One page of `tools/list`
#[derive(Debug, Default)]
pub struct ToolsPage {
    pub tools: Vec<ToolDescriptor>,
    pub next_cursor: Option<String>,
}

pub fn tools_page(result: &Value) -> ToolsPage {
    let tools = result
        .get("tools")
        .and_then(Value::as_array)
        .map(|tools| tools.iter().map(tool_descriptor).collect())
        .unwrap_or_default();
    let next_cursor = result
        .get("nextCursor")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    ToolsPage { tools, next_cursor }
}

fn tool_descriptor(tool: &Value) -> ToolDescriptor {
    ToolDescriptor {
        name: tool.get("name").and_then(Value::as_str).map(str::to_string),
        description: tool
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        args_schema: tool
            .get("inputSchema")
            .cloned()
            .map(SchemaValue::Structured),
    }
}
