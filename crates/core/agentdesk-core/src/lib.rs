//! AgentDesk core
//!
//! Shared pieces of the AgentDesk workspace:
//!
//! - Wire types for `GET /server-info` and `POST /ask`
//! - Display formatting of tool parameter schemas
//! - Summarizing an agent's message trace into reasoning and answer
//! - The `AgentBackend` / `ToolSource` seams implemented by providers
//! - Error type, environment configuration and logging setup
//!
//! # Example
//!
//! ```
//! use agentdesk_core::{format_schema, SchemaValue};
//!
//! let schema = SchemaValue::Text("{'properties': {}, 'required': None}".into());
//! assert!(format_schema(Some(&schema)).contains("\"required\": null"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod agent;
pub mod config;
pub mod error;
pub mod schema;
pub mod transcript;
pub mod types;
pub mod utils;

pub use agent::{AgentBackend, ToolSource};
pub use config::{
    get_env_bool, get_env_int, get_env_opt, get_env_or, get_required_env, load_env, McpSettings,
};
pub use error::{AgentDeskError, Result};
pub use schema::{format_schema, NO_SCHEMA, SCHEMA_FORMAT_ERROR};
pub use transcript::{summarize, AgentMessage, AgentReply, MessageRole};
pub use types::{AskRequest, AskResult, SchemaValue, ServerInfo, ToolDescriptor};
