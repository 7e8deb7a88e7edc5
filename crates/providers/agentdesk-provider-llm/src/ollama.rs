//! Ollama `/api/chat`, non-streaming

use crate::{send_json, LlmSettings};
use agentdesk_core::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: Options,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct Options {
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: String,
}

fn build_request<'a>(settings: &'a LlmSettings, question: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model: &settings.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: &settings.system_prompt,
            },
            ChatMessage {
                role: "user",
                content: question,
            },
        ],
        stream: false,
        options: Options {
            num_predict: settings.max_tokens,
        },
    }
}

fn reply_text(body: serde_json::Value) -> Result<String> {
    let resp: ChatResponse = serde_json::from_value(body)?;
    Ok(resp.message.content)
}

pub(crate) async fn complete(client: &Client, settings: &LlmSettings, question: &str) -> Result<String> {
    let req = client
        .post(format!("{}/api/chat", settings.base_url))
        .json(&build_request(settings, question));
    let body = send_json("ollama", req).await.map_err(|e| {
        tracing::warn!("Ollama request failed; check that Ollama is running at {}", settings.base_url);
        e
    })?;
    reply_text(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderKind;
    use serde_json::json;

    #[test]
    fn test_request_is_not_streamed() {
        let s = LlmSettings {
            provider: ProviderKind::Ollama,
            model: "qwen2.5".into(),
            api_key: None,
            base_url: "http://localhost:11434".into(),
            max_tokens: 256,
            system_prompt: "sys".into(),
        };
        let body = serde_json::to_value(build_request(&s, "q")).unwrap();
        assert_eq!(body["stream"], json!(false));
        assert_eq!(body["model"], json!("qwen2.5"));
        assert_eq!(body["options"]["num_predict"], json!(256));
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_reply_text() {
        let body = json!({
            "model": "qwen2.5",
            "message": {"role": "assistant", "content": "Hello"},
            "done": true
        });
        assert_eq!(reply_text(body).unwrap(), "Hello");
        assert!(reply_text(json!({"done": true})).is_err());
    }
}
