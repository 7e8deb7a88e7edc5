//! Per-page console session: owns the transport, the view and the single
//! in-flight request

use crate::transport::{describe_failure, BackendTransport};
use crate::view::{status, ViewBindings};
use agentdesk_core::{AskRequest, AskResult};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

pub const EMPTY_QUESTION_ALERT: &str = "Please enter a question";
pub const THINKING_NOT_CAPTURED: &str = "Agent reasoning not captured for this request.";
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";
pub const CONNECTION_HINT: &str = "Please check that the server is running and try again.";

/// What became of one `ask_question` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskOutcome {
    /// Another question was in flight; nothing was sent
    Ignored,
    /// Blank question; the user was alerted and nothing was sent
    Rejected,
    /// The agent answered
    Answered,
    /// The backend reported `success == false`
    Failed,
    /// The request never completed
    ConnectionFailed,
}

/// Console controller for one page view
pub struct ConsoleSession<T> {
    pub(crate) transport: T,
    pub(crate) view: ViewBindings,
    in_flight: AtomicBool,
}

/// Holds the in-flight flag; releasing it resets the busy indicators
struct InFlight<'a> {
    flag: &'a AtomicBool,
    view: &'a ViewBindings,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.view.update(|p| {
            p.ask_enabled = true;
            p.spinner_visible = false;
            p.loading_visible = false;
        });
        self.flag.store(false, Ordering::Release);
    }
}

impl<T: BackendTransport> ConsoleSession<T> {
    /// Create a session bound to `view`
    pub fn new(transport: T, view: ViewBindings) -> Self {
        Self {
            transport,
            view,
            in_flight: AtomicBool::new(false),
        }
    }

    /// The bound view
    pub fn view(&self) -> &ViewBindings {
        &self.view
    }

    /// Whether a question is currently outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Option<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight {
                flag: &self.in_flight,
                view: &self.view,
            })
    }

    /// Flip one tool entry; see [`crate::tools::ToolsPanel::toggle`]
    pub fn toggle_tool(&self, tool_id: &str) -> Option<bool> {
        self.view.update(|p| p.tools.toggle(tool_id))
    }

    /// Ask whatever is in the question input
    pub async fn submit(&self) -> AskOutcome {
        let question = self.view.read(|p| p.question.clone());
        self.ask_question(&question).await
    }

    /// Send one question and render the result.
    ///
    /// At most one question is outstanding per session: a call made while
    /// another is in flight returns [`AskOutcome::Ignored`] without sending.
    /// Busy indicators are reset on every exit path, including when the
    /// returned future is dropped early.
    pub async fn ask_question(&self, question: &str) -> AskOutcome {
        if self.is_busy() {
            debug!("question ignored: a request is already in flight");
            return AskOutcome::Ignored;
        }

        let question = question.trim();
        if question.is_empty() {
            self.view
                .update(|p| p.alerts.push(EMPTY_QUESTION_ALERT.to_string()));
            return AskOutcome::Rejected;
        }

        let Some(_in_flight) = self.begin() else {
            debug!("question ignored: a request is already in flight");
            return AskOutcome::Ignored;
        };

        self.view.update(|p| {
            p.question = question.to_string();
            p.ask_enabled = false;
            p.spinner_visible = true;
            p.loading_visible = true;
            p.thinking_status = status::THINKING_BUSY.to_string();
            p.response_status = status::RESPONSE_BUSY.to_string();
            p.thinking_text.clear();
            p.response_text.clear();
        });

        info!("asking agent ({} chars)", question.len());
        match self.transport.ask(&AskRequest::new(question)).await {
            Ok(result) if result.success => {
                self.show_answer(result);
                AskOutcome::Answered
            }
            Ok(result) => {
                warn!("agent reported failure: {:?}", result.error);
                self.show_failure(result);
                AskOutcome::Failed
            }
            Err(err) => {
                warn!("Error asking agent: {}", err);
                self.show_connection_error(&describe_failure(&err));
                AskOutcome::ConnectionFailed
            }
        }
    }

    fn show_answer(&self, result: AskResult) {
        let AskResult {
            thinking, response, ..
        } = result;
        self.view.update(|p| {
            match thinking.filter(|t| !t.is_empty()) {
                Some(thinking) => {
                    p.thinking_text = thinking;
                    p.thinking_status = status::THINKING_DONE.to_string();
                }
                None => {
                    p.thinking_text = THINKING_NOT_CAPTURED.to_string();
                    p.thinking_status = status::THINKING_MISSING.to_string();
                }
            }
            p.response_text = response;
            p.response_status = status::RESPONSE_DONE.to_string();
        });
    }

    fn show_failure(&self, result: AskResult) {
        let error = result
            .error
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        self.view.update(|p| {
            p.thinking_text.clear();
            p.response_text = format!("Error: {}", error);
            p.thinking_status = status::THINKING_ERROR.to_string();
            p.response_status = status::RESPONSE_ERROR.to_string();
        });
    }

    fn show_connection_error(&self, cause: &str) {
        self.view.update(|p| {
            p.thinking_text.clear();
            p.response_text = format!("Connection error: {}\n\n{}", cause, CONNECTION_HINT);
            p.thinking_status = status::THINKING_OFFLINE.to_string();
            p.response_status = status::RESPONSE_OFFLINE.to_string();
        });
    }
}
