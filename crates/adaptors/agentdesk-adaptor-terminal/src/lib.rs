//! Terminal front end: page rendering and a redacting log tail

mod render;

pub use render::render_page;

use agentdesk_core::utils::logger::{subscribe_logs, LogEvent};
use agentdesk_core::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

static REDACTIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"sk-[A-Za-z0-9_-]{20,}", "sk-REDACTED"),
        (r"(?i)bearer\s+[A-Za-z0-9._~+/=-]{8,}", "Bearer REDACTED"),
        (r"(?i)api[_-]?key\s*[:=]?\s*[A-Za-z0-9_-]{12,}", "api_key=REDACTED"),
        (r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}", "email@redacted"),
        (r"\+?\d[\d\s-]{8,}\d", "PHONE_REDACTED"),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Mask keys, tokens, e-mail addresses and phone numbers
pub fn redact(message: &str) -> String {
    REDACTIONS
        .iter()
        .fold(message.to_string(), |msg, (re, rep)| re.replace_all(&msg, *rep).into_owned())
}

#[derive(Debug, Clone, Default)]
pub struct TerminalConfig {
    pub enabled: bool,
    /// Only show events whose target or message contains this (case-insensitive)
    pub target_filter: Option<String>,
}

impl TerminalConfig {
    fn accepts(&self, ev: &LogEvent) -> bool {
        match &self.target_filter {
            Some(f) => {
                let f = f.to_lowercase();
                ev.message.to_lowercase().contains(&f) || ev.target.to_lowercase().contains(&f)
            }
            None => true,
        }
    }
}

/// One printed line
pub fn format_event(ev: &LogEvent) -> String {
    format!("[{}][{}] [{}] {}", ev.time, ev.level, ev.target, redact(&ev.message))
}

pub struct TerminalAdaptor {
    pub config: TerminalConfig,
}

impl TerminalAdaptor {
    pub fn new(config: TerminalConfig) -> Self {
        Self { config }
    }

    /// Print broadcast log events until the logger goes away. `None` when
    /// disabled or logging was never initialized.
    pub async fn start(&self) -> Result<Option<JoinHandle<()>>> {
        if !self.config.enabled {
            return Ok(None);
        }
        let Some(mut rx) = subscribe_logs() else {
            return Ok(None);
        };
        let config = self.config.clone();
        let handle = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) if config.accepts(&ev) => eprintln!("{}", format_event(&ev)),
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        eprintln!("[log tail] skipped {} events", skipped)
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        Ok(Some(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(target: &str, message: &str) -> LogEvent {
        LogEvent {
            level: "INFO".into(),
            target: target.into(),
            message: message.into(),
            file: None,
            line: None,
            time: "2024-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn test_redact_secrets() {
        assert_eq!(redact("key sk-abcdefghijklmnopqrstuvwx"), "key sk-REDACTED");
        assert_eq!(redact("Authorization: Bearer abc.def.ghi-123"), "Authorization: Bearer REDACTED");
        assert_eq!(redact("api_key=abcdefghijklmnop"), "api_key=REDACTED");
        assert_eq!(redact("mail ops@example.com now"), "mail email@redacted now");
        assert_eq!(redact("call +1 555-123-4567"), "call PHONE_REDACTED");
        assert_eq!(redact("nothing to hide"), "nothing to hide");
    }

    #[test]
    fn test_filter_matches_target_or_message() {
        let config = TerminalConfig {
            enabled: true,
            target_filter: Some("MCP".into()),
        };
        assert!(config.accepts(&event("agentdesk_provider_mcp", "hello")));
        assert!(config.accepts(&event("other", "MCP session initialized")));
        assert!(!config.accepts(&event("other", "hello")));
        assert!(TerminalConfig::default().accepts(&event("x", "y")));
    }

    #[test]
    fn test_format_event() {
        let line = format_event(&event("web", "from ops@example.com"));
        assert_eq!(line, "[2024-01-01T00:00:00Z][INFO] [web] from email@redacted");
    }

    #[tokio::test]
    async fn test_disabled_adaptor_does_not_start() {
        let adaptor = TerminalAdaptor::new(TerminalConfig::default());
        assert!(adaptor.start().await.unwrap().is_none());
    }
}
