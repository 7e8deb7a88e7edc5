//! Error types for AgentDesk

use thiserror::Error;

/// Main error type for AgentDesk operations
#[derive(Debug, Error)]
pub enum AgentDeskError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Transport failure that did not originate in reqwest
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Upstream provider answered with a non-success status
    #[error("Provider '{provider}' returned HTTP {status}: {body}")]
    UpstreamStatus {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// MCP protocol error
    #[error("MCP error: {0}")]
    Mcp(String),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Convenient Result type using AgentDeskError
pub type Result<T> = std::result::Result<T, AgentDeskError>;

impl AgentDeskError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        AgentDeskError::Config(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        AgentDeskError::Transport(msg.into())
    }

    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        AgentDeskError::Provider(msg.into())
    }

    /// Create an MCP protocol error
    pub fn mcp(msg: impl Into<String>) -> Self {
        AgentDeskError::Mcp(msg.into())
    }

    /// Create a template error
    pub fn template(msg: impl Into<String>) -> Self {
        AgentDeskError::Template(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        AgentDeskError::Other(msg.into())
    }

    /// Create an upstream status error, truncating very long bodies
    pub fn upstream_status(provider: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        let mut body = body.into();
        if body.len() > 2000 {
            body = body.chars().take(2000).collect();
        }
        AgentDeskError::UpstreamStatus {
            provider: provider.into(),
            status,
            body,
        }
    }
}
