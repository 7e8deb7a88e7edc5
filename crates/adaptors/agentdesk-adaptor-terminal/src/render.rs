//! Plain-text rendering of a console page

use agentdesk_client::{PageView, ToolsPanel};
use std::fmt::Write;

const INDENT: &str = "      ";

fn indented(out: &mut String, text: &str) {
    for line in text.lines() {
        let _ = writeln!(out, "{}{}", INDENT, line);
    }
}

fn section(out: &mut String, title: &str, status: &str, body: &str) {
    let _ = writeln!(out, "\n{} [{}]", title, status);
    if body.is_empty() {
        out.push_str("  (empty)\n");
    } else {
        for line in body.lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }
}

/// Render every region of the page. Expanded tool entries show their
/// description and schema; collapsed ones show only the header.
pub fn render_page(page: &PageView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Server: {}", page.server_url);
    let _ = writeln!(out, "Model:  {}", page.model_name);

    out.push_str("\nAvailable Tools\n");
    match &page.tools {
        ToolsPanel::Entries(entries) => {
            for entry in entries {
                let _ = writeln!(out, "  {} {}", entry.icon(), entry.name);
                if entry.expanded {
                    let _ = writeln!(out, "    Description:");
                    indented(&mut out, &entry.description);
                    let _ = writeln!(out, "    Parameters Schema:");
                    indented(&mut out, &entry.schema_text);
                }
            }
        }
        other => {
            let _ = writeln!(out, "  {}", other.placeholder().unwrap_or_default());
        }
    }

    if page.spinner_visible || page.loading_visible {
        out.push_str("\n... thinking\n");
    }
    for alert in &page.alerts {
        let _ = writeln!(out, "\n! {}", alert);
    }

    section(&mut out, "Agent Reasoning", &page.thinking_status, &page.thinking_text);
    section(&mut out, "Response", &page.response_status, &page.response_text);
    out
}
