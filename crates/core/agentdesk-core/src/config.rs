//! Configuration management and environment variable loading

use crate::{AgentDeskError, Result};
use std::env;

/// Default port for the web UI
pub const DEFAULT_UI_PORT: u16 = 8001;

/// Load environment variables from a .env file
///
/// A missing file is not an error; a malformed one is.
///
/// # Example
///
/// ```no_run
/// use agentdesk_core::load_env;
///
/// load_env().ok();
/// let provider = std::env::var("LLM_PROVIDER").unwrap_or_default();
/// ```
pub fn load_env() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::info!("Loaded environment from: {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::LineParse(line, pos)) => Err(AgentDeskError::config(format!(
            "Failed to parse .env file at line {}, position {}",
            line, pos
        ))),
        Err(dotenvy::Error::Io(_)) => {
            tracing::debug!("No .env file found - using system environment variables only");
            Ok(())
        }
        Err(e) => Err(AgentDeskError::config(format!(
            "Failed to load .env file: {}",
            e
        ))),
    }
}

/// Get required environment variable
pub fn get_required_env(key: &str) -> Result<String> {
    env::var(key).map_err(|_| {
        AgentDeskError::config(format!(
            "Required environment variable '{}' is not set. \
             Check your .env file or system environment.",
            key
        ))
    })
}

/// Get optional environment variable with default
pub fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get optional environment variable, treating blank values as unset
pub fn get_env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get environment variable as boolean
pub fn get_env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

/// Get environment variable as integer
pub fn get_env_int<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Connection settings for the MCP server whose tools are listed in the UI
#[derive(Debug, Clone, Default)]
pub struct McpSettings {
    /// MCP endpoint (streamable HTTP)
    pub server_url: Option<String>,
    /// Static bearer token sent with every MCP request
    pub bearer_token: Option<String>,
}

impl McpSettings {
    /// Read `MCP_SERVER_URL` and `MCP_BEARER_TOKEN`
    pub fn from_env() -> Self {
        Self {
            server_url: get_env_opt("MCP_SERVER_URL"),
            bearer_token: get_env_opt("MCP_BEARER_TOKEN"),
        }
    }
}
