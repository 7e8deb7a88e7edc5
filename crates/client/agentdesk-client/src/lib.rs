//! AgentDesk console controller
//!
//! Loads server metadata and the tool catalogue into a typed [`PageView`],
//! relays questions to `POST /ask` with at most one request in flight, and
//! renders the page for the web front end.
//!
//! ```no_run
//! use agentdesk_client::{ConsoleSession, HttpTransport, ViewBindings};
//!
//! # async fn demo() {
//! let session = ConsoleSession::new(HttpTransport::new("http://localhost:8001"), ViewBindings::new());
//! session.load_server_info().await;
//! session.ask_question("Which tools can you use?").await;
//! println!("{}", session.view().snapshot().response_text);
//! # }
//! ```

#![warn(clippy::all)]

pub mod html;
pub mod loader;
pub mod session;
pub mod tools;
pub mod transport;
pub mod view;

pub use html::{PageRenderer, STYLESHEET};
pub use loader::{apply_load_failure, apply_server_info};
pub use session::{AskOutcome, ConsoleSession};
pub use tools::{render_tools, ToolEntry, ToolsPanel};
pub use transport::{describe_failure, BackendTransport, HttpTransport};
pub use view::{status, ElementIds, PageView, ViewBindings};
