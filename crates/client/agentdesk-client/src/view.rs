//! Typed view bindings
//!
//! Every display region of the console lives in one [`PageView`]. Components
//! never look regions up by name; they receive a [`ViewBindings`] handle and
//! mutate the fields directly. Element identifiers are kept only for
//! renderers that need them (the HTML page).

use crate::tools::ToolsPanel;
use std::sync::{Arc, RwLock};

/// Element identifiers of the rendered page
pub struct ElementIds;

impl ElementIds {
    pub const SERVER_URL: &'static str = "serverUrl";
    pub const MODEL_NAME: &'static str = "modelName";
    pub const TOOLS_CONTAINER: &'static str = "toolsContainer";
    pub const QUESTION_INPUT: &'static str = "questionInput";
    pub const ASK_BUTTON: &'static str = "askButton";
    pub const SPINNER: &'static str = "spinner";
    pub const LOADING_TEXT: &'static str = "loadingText";
    pub const THINKING_STATUS: &'static str = "thinkingStatus";
    pub const THINKING_AREA: &'static str = "thinkingArea";
    pub const RESPONSE_STATUS: &'static str = "responseStatus";
    pub const RESPONSE_AREA: &'static str = "responseArea";

    /// Id of the tool entry at `index`
    pub fn tool_id(index: usize) -> String {
        format!("tool-{}", index)
    }

    /// Id of a tool entry's expand/collapse glyph
    pub fn icon_id(tool_id: &str) -> String {
        format!("{}-icon", tool_id)
    }

    /// Id of a tool entry's collapsible body
    pub fn details_id(tool_id: &str) -> String {
        format!("{}-details", tool_id)
    }
}

/// Status line texts
pub mod status {
    pub const THINKING_IDLE: &str = "Waiting for a question";
    pub const RESPONSE_IDLE: &str = "Ready";
    pub const THINKING_BUSY: &str = "Agent is analyzing your request...";
    pub const RESPONSE_BUSY: &str = "Processing...";
    pub const THINKING_DONE: &str = "Reasoning complete";
    pub const THINKING_MISSING: &str = "Reasoning not available";
    pub const RESPONSE_DONE: &str = "Response ready";
    pub const THINKING_ERROR: &str = "Error occurred";
    pub const RESPONSE_ERROR: &str = "Request failed";
    pub const THINKING_OFFLINE: &str = "Connection failed";
    pub const RESPONSE_OFFLINE: &str = "Network error";
}

/// Snapshot of every display region
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub server_url: String,
    pub model_name: String,
    pub tools: ToolsPanel,
    pub question: String,
    pub ask_enabled: bool,
    pub spinner_visible: bool,
    pub loading_visible: bool,
    pub thinking_status: String,
    pub thinking_text: String,
    pub response_status: String,
    pub response_text: String,
    /// Blocking alerts raised to the user, oldest first
    pub alerts: Vec<String>,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            server_url: "Loading...".to_string(),
            model_name: "Loading...".to_string(),
            tools: ToolsPanel::Loading,
            question: String::new(),
            ask_enabled: true,
            spinner_visible: false,
            loading_visible: false,
            thinking_status: status::THINKING_IDLE.to_string(),
            thinking_text: String::new(),
            response_status: status::RESPONSE_IDLE.to_string(),
            response_text: String::new(),
            alerts: Vec::new(),
        }
    }
}

/// Shared handle to the page, constructed once per page view
#[derive(Debug, Clone, Default)]
pub struct ViewBindings {
    page: Arc<RwLock<PageView>>,
}

impl ViewBindings {
    /// Bind a fresh page
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a mutation. Keep closures short; never await inside.
    pub fn update<R>(&self, f: impl FnOnce(&mut PageView) -> R) -> R {
        let mut page = self.page.write().unwrap_or_else(|e| e.into_inner());
        f(&mut page)
    }

    /// Read without copying
    pub fn read<R>(&self, f: impl FnOnce(&PageView) -> R) -> R {
        let page = self.page.read().unwrap_or_else(|e| e.into_inner());
        f(&page)
    }

    /// Copy the current page for rendering
    pub fn snapshot(&self) -> PageView {
        self.read(PageView::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_ids() {
        let id = ElementIds::tool_id(3);
        assert_eq!(id, "tool-3");
        assert_eq!(ElementIds::icon_id(&id), "tool-3-icon");
        assert_eq!(ElementIds::details_id(&id), "tool-3-details");
    }

    #[test]
    fn test_bindings_share_one_page() {
        let view = ViewBindings::new();
        let other = view.clone();
        other.update(|p| p.response_text = "42".into());
        assert_eq!(view.snapshot().response_text, "42");
    }

    #[test]
    fn test_fresh_page_is_idle() {
        let page = PageView::default();
        assert!(page.ask_enabled);
        assert!(!page.spinner_visible);
        assert_eq!(page.tools, ToolsPanel::Loading);
    }
}
