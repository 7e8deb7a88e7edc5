//! Shapes an agent's message trace into the `thinking` / `response` pair
//! returned by `POST /ask`

use serde::{Deserialize, Serialize};

/// Marker an agent can emit to delimit its final answer
pub const FINAL_RESPONSE_MARKER: &str = "FINAL RESPONSE:";

const DEFAULT_THINKING: &str = "Agent processed the request";

/// Words that mark intermediate (tool plumbing) content
const INTERMEDIATE_HINTS: [&str; 4] = ["tool", "function", "action:", "observation:"];

/// Who produced a message in the agent trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The asking user
    User,
    /// The model
    Assistant,
    /// A tool invocation or its result
    Tool,
    /// System prompt
    System,
}

/// One message of an agent run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMessage {
    /// Author
    pub role: MessageRole,
    /// Text content
    pub content: String,
}

impl AgentMessage {
    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    /// Tool message
    pub fn tool(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Tool,
            content: content.into(),
        }
    }
}

/// Reasoning trace and final answer extracted from a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReply {
    /// Human-readable trace
    pub thinking: String,
    /// Final answer
    pub response: String,
}

/// Summarize an agent run
pub fn summarize(messages: &[AgentMessage]) -> AgentReply {
    let last_index = messages.len().saturating_sub(1);
    let mut contents: Vec<&str> = Vec::new();
    let mut thinking: Vec<String> = Vec::new();

    for (i, message) in messages.iter().enumerate() {
        let content = message.content.trim();
        if content.is_empty() {
            continue;
        }
        contents.push(content);

        if message.role == MessageRole::Tool || content.to_lowercase().contains("tool") {
            thinking.push(format!("Tool: {}", content));
        } else if i == 0 {
            thinking.push(format!("User: {}", content));
        } else if i < last_index {
            thinking.push(format!("Agent: {}", content));
        }
    }

    let thinking = if thinking.is_empty() {
        DEFAULT_THINKING.to_string()
    } else {
        thinking.join("\n\n")
    };

    let response = if contents.is_empty() {
        format!("No content found in response ({} messages)", messages.len())
    } else {
        pick_response(&contents)
    };

    AgentReply { thinking, response }
}

fn pick_response(contents: &[&str]) -> String {
    let marked = contents
        .iter()
        .find_map(|c| c.split_once(FINAL_RESPONSE_MARKER))
        .map(|(_, after)| after.trim())
        .filter(|s| !s.is_empty());
    if let Some(found) = marked {
        return found.to_string();
    }

    let plain = contents.iter().rev().find(|c| {
        let lower = c.to_lowercase();
        !INTERMEDIATE_HINTS.iter().any(|hint| lower.contains(hint))
    });
    if let Some(found) = plain {
        return found.to_string();
    }

    contents.last().copied().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_question_and_answer() {
        let reply = summarize(&[
            AgentMessage::user("What is the headcount?"),
            AgentMessage::assistant("The headcount is 42."),
        ]);
        assert_eq!(reply.thinking, "User: What is the headcount?");
        assert_eq!(reply.response, "The headcount is 42.");
    }

    #[test]
    fn test_final_response_marker_wins() {
        let reply = summarize(&[
            AgentMessage::user("q"),
            AgentMessage::assistant("Working on it. FINAL RESPONSE:  It is 7.  "),
            AgentMessage::assistant("trailing chatter"),
        ]);
        assert_eq!(reply.response, "It is 7.");
        assert_eq!(reply.thinking, "User: q\n\nAgent: Working on it. FINAL RESPONSE:  It is 7.");
    }

    #[test]
    fn test_tool_messages_go_to_thinking_not_response() {
        let reply = summarize(&[
            AgentMessage::user("how many employees?"),
            AgentMessage::assistant("Let me check."),
            AgentMessage::tool("{\"headcount\": 42}"),
            AgentMessage::assistant("Calling function lookup"),
        ]);
        assert!(reply.thinking.contains("Tool: {\"headcount\": 42}"));
        assert!(reply.thinking.contains("Agent: Let me check."));
        // last content mentions "function"; the newest plain one is picked
        assert_eq!(reply.response, "{\"headcount\": 42}");
    }

    #[test]
    fn test_all_intermediate_falls_back_to_last() {
        let reply = summarize(&[AgentMessage::tool("tool output"), AgentMessage::tool("tool done")]);
        assert_eq!(reply.response, "tool done");
    }

    #[test]
    fn test_no_content() {
        let reply = summarize(&[AgentMessage::user("   "), AgentMessage::assistant("")]);
        assert_eq!(reply.thinking, DEFAULT_THINKING);
        assert_eq!(reply.response, "No content found in response (2 messages)");
    }
}
