//! Server-side rendering of the console page

use crate::session::{CONNECTION_HINT, EMPTY_QUESTION_ALERT, THINKING_NOT_CAPTURED, UNKNOWN_ERROR};
use crate::tools::{ToolEntry, ToolsPanel, COLLAPSED_ICON, EXPANDED_ICON};
use crate::view::{status, PageView};
use agentdesk_core::{AgentDeskError, Result};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

const PAGE_TEMPLATE_NAME: &str = "page";

/// Stylesheet served at `/styles.css`
pub const STYLESHEET: &str = r#"* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
  background: #f4f6f9;
  color: #1f2933;
}

header {
  padding: 16px 24px;
  background: #1f2933;
  color: #f5f7fa;
}

header h1 {
  margin: 0 0 8px;
  font-size: 20px;
}

.meta {
  display: flex;
  gap: 24px;
  font-size: 13px;
  color: #cbd2d9;
}

.meta span.value {
  color: #ffffff;
  font-family: ui-monospace, Menlo, monospace;
}

main {
  display: grid;
  grid-template-columns: 320px 1fr;
  gap: 16px;
  padding: 16px 24px;
}

.panel {
  background: #ffffff;
  border: 1px solid #e4e7eb;
  border-radius: 8px;
  padding: 16px;
}

.panel h2 {
  margin: 0 0 12px;
  font-size: 15px;
}

.tool-item {
  border: 1px solid #e4e7eb;
  border-radius: 6px;
  margin-bottom: 8px;
}

.tool-header {
  display: flex;
  justify-content: space-between;
  padding: 8px 12px;
  cursor: pointer;
  font-weight: 600;
}

.tool-header:hover {
  background: #f5f7fa;
}

.tool-details {
  display: none;
  padding: 0 12px 12px;
  font-size: 13px;
}

.tool-details.expanded {
  display: block;
}

.tool-description-title,
.tool-schema-title {
  font-weight: 600;
  margin: 8px 0 4px;
}

.tool-schema-content pre {
  margin: 0;
  padding: 8px;
  background: #f5f7fa;
  border-radius: 4px;
  overflow-x: auto;
  font-size: 12px;
}

.no-tools,
.error {
  font-size: 13px;
  color: #7b8794;
}

.error {
  color: #cf1124;
}

.ask-row {
  display: flex;
  gap: 8px;
  align-items: center;
}

#questionInput {
  flex: 1;
  padding: 10px;
  border: 1px solid #cbd2d9;
  border-radius: 6px;
  font-size: 14px;
}

#askButton {
  padding: 10px 18px;
  border: 0;
  border-radius: 6px;
  background: #2186eb;
  color: #ffffff;
  cursor: pointer;
}

#askButton:disabled {
  background: #9aa5b1;
  cursor: not-allowed;
}

.spinner {
  width: 18px;
  height: 18px;
  border: 3px solid #e4e7eb;
  border-top-color: #2186eb;
  border-radius: 50%;
  animation: spin 0.8s linear infinite;
}

@keyframes spin {
  to {
    transform: rotate(360deg);
  }
}

.loading-text {
  font-size: 13px;
  color: #7b8794;
}

.status {
  font-size: 12px;
  color: #7b8794;
  margin-bottom: 6px;
}

textarea {
  width: 100%;
  min-height: 180px;
  padding: 10px;
  border: 1px solid #e4e7eb;
  border-radius: 6px;
  font-family: ui-monospace, Menlo, monospace;
  font-size: 13px;
  resize: vertical;
}
"#;

const PAGE_TEMPLATE: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>AgentDesk</title>
  <link rel="stylesheet" href="/styles.css">
</head>
<body>
  <header>
    <h1>AgentDesk</h1>
    <div class="meta">
      <div>Server: <span class="value" id="serverUrl">{{server_url}}</span></div>
      <div>Model: <span class="value" id="modelName">{{model_name}}</span></div>
    </div>
  </header>
  <main>
    <section class="panel">
      <h2>Available Tools</h2>
      <div id="toolsContainer">
        {{#if placeholder}}
        <div class="{{placeholder_class}}">{{placeholder}}</div>
        {{/if}}
        {{#each tools}}
        <div class="tool-item">
          <div class="tool-header" onclick="toggleTool('{{id}}')">
            <span class="tool-name">{{name}}</span>
            <span class="tool-expand-icon" id="{{icon_id}}">{{icon}}</span>
          </div>
          <div class="tool-details{{#if expanded}} expanded{{/if}}" id="{{details_id}}">
            <div class="tool-details-content">
              <div class="tool-description-section">
                <div class="tool-description-title">Description</div>
                <div class="tool-description">{{description}}</div>
              </div>
              <div class="tool-schema">
                <div class="tool-schema-title">Parameters Schema</div>
                <div class="tool-schema-content"><pre>{{schema_text}}</pre></div>
              </div>
            </div>
          </div>
        </div>
        {{/each}}
      </div>
    </section>
    <section>
      <div class="panel">
        <h2>Ask the Agent</h2>
        <div class="ask-row">
          <input type="text" id="questionInput" placeholder="Type your question and press Enter" value="{{question}}">
          <button id="askButton"{{#unless ask_enabled}} disabled{{/unless}}>Ask</button>
          <div class="spinner" id="spinner" style="display: {{#if spinner_visible}}block{{else}}none{{/if}}"></div>
          <span class="loading-text" id="loadingText" style="display: {{#if loading_visible}}block{{else}}none{{/if}}">Thinking...</span>
        </div>
      </div>
      <div class="panel">
        <h2>Agent Reasoning</h2>
        <div class="status" id="thinkingStatus">{{thinking_status}}</div>
        <textarea id="thinkingArea" readonly>{{thinking_text}}</textarea>
      </div>
      <div class="panel">
        <h2>Response</h2>
        <div class="status" id="responseStatus">{{response_status}}</div>
        <textarea id="responseArea" readonly>{{response_text}}</textarea>
      </div>
    </section>
  </main>
  <script>
    const TEXT = {{{texts}}};
{{{script}}}
  </script>
</body>
</html>
"##;

const PAGE_SCRIPT: &str = r##"
    let isProcessing = false;

    function byId(id) {
      return document.getElementById(id);
    }

    function toggleTool(toolId) {
      const details = byId(toolId + '-details');
      const icon = byId(toolId + '-icon');
      if (!details) {
        console.error('Could not find details element for:', toolId);
        return;
      }
      const expanded = details.classList.toggle('expanded');
      if (icon) {
        icon.textContent = expanded ? TEXT.expandedIcon : TEXT.collapsedIcon;
      }
    }

    function setBusy(busy) {
      byId('askButton').disabled = busy;
      byId('spinner').style.display = busy ? 'block' : 'none';
      byId('loadingText').style.display = busy ? 'block' : 'none';
    }

    function show(thinkingStatus, thinking, responseStatus, response) {
      byId('thinkingStatus').textContent = thinkingStatus;
      byId('thinkingArea').value = thinking;
      byId('responseStatus').textContent = responseStatus;
      byId('responseArea').value = response;
    }

    async function askAgent() {
      if (isProcessing) {
        return;
      }
      const question = byId('questionInput').value.trim();
      if (!question) {
        alert(TEXT.emptyQuestion);
        return;
      }

      isProcessing = true;
      setBusy(true);
      show(TEXT.thinkingBusy, '', TEXT.responseBusy, '');
      try {
        const response = await fetch('/ask', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ question: question })
        });
        const data = await response.json();
        if (data.success) {
          if (data.thinking) {
            show(TEXT.thinkingDone, data.thinking, TEXT.responseDone, data.response);
          } else {
            show(TEXT.thinkingMissing, TEXT.thinkingPlaceholder, TEXT.responseDone, data.response);
          }
        } else {
          show(TEXT.thinkingError, '', TEXT.responseError, 'Error: ' + (data.error || TEXT.unknownError));
        }
      } catch (error) {
        console.error('Error asking agent:', error);
        show(TEXT.thinkingOffline, '', TEXT.responseOffline,
          'Connection error: ' + error.message + '\n\n' + TEXT.connectionHint);
      } finally {
        isProcessing = false;
        setBusy(false);
      }
    }

    byId('askButton').addEventListener('click', askAgent);
    byId('questionInput').addEventListener('keydown', function (e) {
      if (e.key === 'Enter' && !isProcessing) {
        askAgent();
      }
    });
"##;

#[derive(Serialize)]
struct ToolContext<'a> {
    id: &'a str,
    icon_id: String,
    details_id: String,
    icon: String,
    name: &'a str,
    description: &'a str,
    schema_text: &'a str,
    expanded: bool,
}

impl<'a> From<&'a ToolEntry> for ToolContext<'a> {
    fn from(entry: &'a ToolEntry) -> Self {
        Self {
            id: &entry.id,
            icon_id: entry.icon_id(),
            details_id: entry.details_id(),
            icon: entry.icon().to_string(),
            name: &entry.name,
            description: &entry.description,
            schema_text: &entry.schema_text,
            expanded: entry.expanded,
        }
    }
}

#[derive(Serialize)]
struct PageContext<'a> {
    server_url: &'a str,
    model_name: &'a str,
    placeholder: Option<&'static str>,
    placeholder_class: &'static str,
    tools: Vec<ToolContext<'a>>,
    question: &'a str,
    ask_enabled: bool,
    spinner_visible: bool,
    loading_visible: bool,
    thinking_status: &'a str,
    thinking_text: &'a str,
    response_status: &'a str,
    response_text: &'a str,
    texts: String,
    script: &'static str,
}

/// Texts shared with the inline script, as a JS object literal
fn script_texts() -> String {
    json!({
        "emptyQuestion": EMPTY_QUESTION_ALERT,
        "thinkingBusy": status::THINKING_BUSY,
        "responseBusy": status::RESPONSE_BUSY,
        "thinkingDone": status::THINKING_DONE,
        "thinkingMissing": status::THINKING_MISSING,
        "thinkingPlaceholder": THINKING_NOT_CAPTURED,
        "responseDone": status::RESPONSE_DONE,
        "thinkingError": status::THINKING_ERROR,
        "responseError": status::RESPONSE_ERROR,
        "unknownError": UNKNOWN_ERROR,
        "thinkingOffline": status::THINKING_OFFLINE,
        "responseOffline": status::RESPONSE_OFFLINE,
        "connectionHint": CONNECTION_HINT,
        "collapsedIcon": COLLAPSED_ICON.to_string(),
        "expandedIcon": EXPANDED_ICON.to_string(),
    })
    .to_string()
}

/// Handlebars wrapper holding the compiled page template
pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl PageRenderer {
    /// Compile the page template
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars
            .register_template_string(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)
            .map_err(|e| AgentDeskError::template(e.to_string()))?;
        Ok(Self { handlebars })
    }

    /// Render the complete page. Every page-derived string is HTML-escaped.
    pub fn render(&self, page: &PageView) -> Result<String> {
        let placeholder = page.tools.placeholder();
        let placeholder_class = match page.tools {
            ToolsPanel::Unavailable | ToolsPanel::LoadFailed => "error",
            _ => "no-tools",
        };
        let context = PageContext {
            server_url: &page.server_url,
            model_name: &page.model_name,
            placeholder,
            placeholder_class,
            tools: page.tools.entries().iter().map(ToolContext::from).collect(),
            question: &page.question,
            ask_enabled: page.ask_enabled,
            spinner_visible: page.spinner_visible,
            loading_visible: page.loading_visible,
            thinking_status: &page.thinking_status,
            thinking_text: &page.thinking_text,
            response_status: &page.response_status,
            response_text: &page.response_text,
            texts: script_texts(),
            script: PAGE_SCRIPT,
        };
        self.handlebars
            .render(PAGE_TEMPLATE_NAME, &context)
            .map_err(|e| AgentDeskError::template(e.to_string()))
    }
}
