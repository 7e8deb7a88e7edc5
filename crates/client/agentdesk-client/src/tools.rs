//! Tool list rendering and per-entry expand/collapse state

use crate::view::ElementIds;
use agentdesk_core::{format_schema, ToolDescriptor};

pub const LOADING_TOOLS: &str = "Loading tools...";
pub const NO_TOOLS: &str = "No tools available";
pub const TOOLS_UNAVAILABLE: &str = "Tools info not available";
pub const TOOLS_LOAD_FAILED: &str = "Error loading tools info";
pub const UNNAMED_TOOL: &str = "Unnamed Tool";
pub const NO_DESCRIPTION: &str = "No description available";

/// Glyph of a collapsed entry
pub const COLLAPSED_ICON: char = '\u{25B6}';
/// Glyph of an expanded entry
pub const EXPANDED_ICON: char = '\u{25BC}';

/// Contents of the tools container
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ToolsPanel {
    /// Server info not loaded yet
    #[default]
    Loading,
    /// Server answered with no tools
    Empty,
    /// Server answered `success == false`
    Unavailable,
    /// Server info request failed
    LoadFailed,
    /// One entry per tool, in server order
    Entries(Vec<ToolEntry>),
}

/// One collapsible tool entry
#[derive(Debug, Clone, PartialEq)]
pub struct ToolEntry {
    /// `tool-<index>`
    pub id: String,
    pub name: String,
    pub description: String,
    /// Schema text as produced by the schema formatter
    pub schema_text: String,
    pub expanded: bool,
}

impl ToolEntry {
    fn from_descriptor(index: usize, tool: &ToolDescriptor) -> Self {
        Self {
            id: ElementIds::tool_id(index),
            name: non_blank(tool.name.as_deref()).unwrap_or(UNNAMED_TOOL).to_string(),
            description: non_blank(tool.description.as_deref())
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            schema_text: format_schema(tool.args_schema.as_ref()),
            expanded: false,
        }
    }

    /// Current direction glyph
    pub fn icon(&self) -> char {
        if self.expanded {
            EXPANDED_ICON
        } else {
            COLLAPSED_ICON
        }
    }

    pub fn icon_id(&self) -> String {
        ElementIds::icon_id(&self.id)
    }

    pub fn details_id(&self) -> String {
        ElementIds::details_id(&self.id)
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Build the tools panel from a server-supplied list
pub fn render_tools(tools: Option<&[ToolDescriptor]>) -> ToolsPanel {
    match tools {
        Some(tools) if !tools.is_empty() => ToolsPanel::Entries(
            tools
                .iter()
                .enumerate()
                .map(|(i, t)| ToolEntry::from_descriptor(i, t))
                .collect(),
        ),
        _ => ToolsPanel::Empty,
    }
}

impl ToolsPanel {
    /// Fixed text shown instead of entries, if any
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ToolsPanel::Loading => Some(LOADING_TOOLS),
            ToolsPanel::Empty => Some(NO_TOOLS),
            ToolsPanel::Unavailable => Some(TOOLS_UNAVAILABLE),
            ToolsPanel::LoadFailed => Some(TOOLS_LOAD_FAILED),
            ToolsPanel::Entries(_) => None,
        }
    }

    /// Entries, empty for placeholders
    pub fn entries(&self) -> &[ToolEntry] {
        match self {
            ToolsPanel::Entries(entries) => entries,
            _ => &[],
        }
    }

    /// Flip one entry between collapsed and expanded.
    ///
    /// Returns the new expanded state, or `None` if no entry has that id.
    pub fn toggle(&mut self, tool_id: &str) -> Option<bool> {
        let entry = match self {
            ToolsPanel::Entries(entries) => entries.iter_mut().find(|e| e.id == tool_id),
            _ => None,
        };
        match entry {
            Some(entry) => {
                entry.expanded = !entry.expanded;
                Some(entry.expanded)
            }
            None => {
                tracing::error!("Could not find details element for: {}", tool_id);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdesk_core::SchemaValue;
    use serde_json::json;

    fn sample() -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::named("search")
                .with_description("Search metrics")
                .with_schema(SchemaValue::Structured(json!({"type": "object"}))),
            ToolDescriptor::default(),
        ]
    }

    #[test]
    fn test_empty_or_absent_renders_placeholder() {
        assert_eq!(render_tools(None), ToolsPanel::Empty);
        let panel = render_tools(Some(&[]));
        assert_eq!(panel.placeholder(), Some(NO_TOOLS));
        assert!(panel.entries().is_empty());
    }

    #[test]
    fn test_entries_in_order_with_fallbacks() {
        let panel = render_tools(Some(&sample()));
        let entries = panel.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "tool-0");
        assert_eq!(entries[0].name, "search");
        assert_eq!(entries[0].schema_text, "{\n  \"type\": \"object\"\n}");
        assert_eq!(entries[1].id, "tool-1");
        assert_eq!(entries[1].name, UNNAMED_TOOL);
        assert_eq!(entries[1].description, NO_DESCRIPTION);
        assert_eq!(entries[1].schema_text, agentdesk_core::NO_SCHEMA);
        assert!(entries.iter().all(|e| !e.expanded && e.icon() == COLLAPSED_ICON));
    }

    #[test]
    fn test_toggle_is_per_entry() {
        let mut panel = render_tools(Some(&sample()));
        assert_eq!(panel.toggle("tool-1"), Some(true));
        let entries = panel.entries();
        assert!(!entries[0].expanded);
        assert!(entries[1].expanded);
        assert_eq!(entries[1].icon(), EXPANDED_ICON);

        assert_eq!(panel.toggle("tool-1"), Some(false));
        assert_eq!(panel.entries()[1].icon(), COLLAPSED_ICON);
    }

    #[test]
    fn test_toggle_unknown_id_changes_nothing() {
        let mut panel = render_tools(Some(&sample()));
        let before = panel.clone();
        assert_eq!(panel.toggle("tool-9"), None);
        assert_eq!(panel, before);
        assert_eq!(ToolsPanel::Empty.toggle("tool-0"), None);
    }
}
