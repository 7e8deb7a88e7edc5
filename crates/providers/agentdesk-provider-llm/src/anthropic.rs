//! Anthropic Messages API

use crate::{send_json, LlmSettings};
use agentdesk_core::{AgentDeskError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

fn build_request<'a>(settings: &'a LlmSettings, question: &'a str) -> MessagesRequest<'a> {
    MessagesRequest {
        model: &settings.model,
        max_tokens: settings.max_tokens,
        system: &settings.system_prompt,
        messages: vec![Message {
            role: "user",
            content: question,
        }],
    }
}

fn reply_text(body: serde_json::Value) -> Result<String> {
    let resp: MessagesResponse = serde_json::from_value(body)?;
    let text: Vec<String> = resp
        .content
        .into_iter()
        .filter(|b| b.kind == "text")
        .map(|b| b.text)
        .collect();
    if text.is_empty() {
        return Err(AgentDeskError::provider("Anthropic returned no text content"));
    }
    Ok(text.join(""))
}

pub(crate) async fn complete(client: &Client, settings: &LlmSettings, question: &str) -> Result<String> {
    let req = client
        .post(format!("{}/messages", settings.base_url))
        .header("x-api-key", settings.api_key())
        .header("anthropic-version", API_VERSION)
        .json(&build_request(settings, question));
    let body = send_json("anthropic", req).await?;
    reply_text(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderKind;
    use serde_json::json;

    fn settings() -> LlmSettings {
        LlmSettings {
            provider: ProviderKind::Anthropic,
            model: "claude-test".into(),
            api_key: Some("k".into()),
            base_url: "https://api.anthropic.com/v1".into(),
            max_tokens: 100,
            system_prompt: "be brief".into(),
        }
    }

    #[test]
    fn test_request_shape() {
        let s = settings();
        let body = serde_json::to_value(build_request(&s, "hi")).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "claude-test",
                "max_tokens": 100,
                "system": "be brief",
                "messages": [{"role": "user", "content": "hi"}]
            })
        );
    }

    #[test]
    fn test_reply_joins_text_blocks() {
        let body = json!({
            "content": [
                {"type": "text", "text": "Hello "},
                {"type": "tool_use", "id": "x", "name": "search", "input": {}},
                {"type": "text", "text": "world"}
            ]
        });
        assert_eq!(reply_text(body).unwrap(), "Hello world");
    }

    #[test]
    fn test_reply_without_text_is_error() {
        assert!(reply_text(json!({"content": []})).is_err());
    }
}
