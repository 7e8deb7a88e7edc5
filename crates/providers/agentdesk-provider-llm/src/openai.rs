//! OpenAI-compatible chat completions

use crate::{send_json, LlmSettings};
use agentdesk_core::{AgentDeskError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_completion_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
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
        temperature: 0.0,
        max_completion_tokens: settings.max_tokens,
    }
}

fn reply_text(body: serde_json::Value) -> Result<String> {
    let resp: ChatResponse = serde_json::from_value(body)?;
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| AgentDeskError::provider("OpenAI returned no choices"))
}

pub(crate) async fn complete(client: &Client, settings: &LlmSettings, question: &str) -> Result<String> {
    let req = client
        .post(format!("{}/chat/completions", settings.base_url))
        .bearer_auth(settings.api_key())
        .json(&build_request(settings, question));
    let body = send_json("openai", req).await?;
    reply_text(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderKind;
    use serde_json::json;

    #[test]
    fn test_request_has_system_then_user() {
        let s = LlmSettings {
            provider: ProviderKind::OpenAi,
            model: "gpt-test".into(),
            api_key: Some("sk".into()),
            base_url: "https://api.openai.com/v1".into(),
            max_tokens: 64,
            system_prompt: "sys".into(),
        };
        let body = serde_json::to_value(build_request(&s, "q")).unwrap();
        assert_eq!(body["messages"][0], json!({"role": "system", "content": "sys"}));
        assert_eq!(body["messages"][1], json!({"role": "user", "content": "q"}));
        assert_eq!(body["temperature"], json!(0.0));
        assert_eq!(body["max_completion_tokens"], json!(64));
    }

    #[test]
    fn test_reply_takes_first_choice() {
        let body = json!({
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "42"}},
                {"index": 1, "message": {"role": "assistant", "content": "43"}}
            ]
        });
        assert_eq!(reply_text(body).unwrap(), "42");
        assert!(reply_text(json!({"choices": []})).is_err());
    }
}
