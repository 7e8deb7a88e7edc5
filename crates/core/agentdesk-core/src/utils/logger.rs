//! Logging utilities

use once_cell::sync::OnceCell;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// A log record as seen by in-process subscribers (the terminal log tail)
#[derive(Clone, Debug, Serialize)]
pub struct LogEvent {
    /// Level name (`INFO`, `WARN`, ...)
    pub level: String,
    /// Event target, usually the module path
    pub target: String,
    /// Formatted message
    pub message: String,
    /// Source file
    pub file: Option<String>,
    /// Source line
    pub line: Option<u32>,
    /// RFC 3339 timestamp
    pub time: String,
}

static LOG_TX: OnceCell<broadcast::Sender<LogEvent>> = OnceCell::new();

/// Subscribe to log events; `None` until [`init_logging`] has run
pub fn subscribe_logs() -> Option<broadcast::Receiver<LogEvent>> {
    LOG_TX.get().map(|tx| tx.subscribe())
}

struct BroadcastLayer {
    tx: broadcast::Sender<LogEvent>,
}

impl<S> Layer<S> for BroadcastLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        use tracing::field::{Field, Visit};
        struct MsgVisitor {
            msg: String,
        }
        impl Visit for MsgVisitor {
            fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.msg = format!("{:?}", value);
                }
            }
            fn record_str(&mut self, field: &Field, value: &str) {
                if field.name() == "message" {
                    self.msg = value.to_string();
                }
            }
        }
        // nobody listening
        if self.tx.receiver_count() == 0 {
            return;
        }
        let mut visitor = MsgVisitor { msg: String::new() };
        event.record(&mut visitor);
        let meta = event.metadata();
        let ev = LogEvent {
            level: meta.level().to_string(),
            target: meta.target().to_string(),
            message: visitor.msg,
            file: meta.file().map(|s| s.to_string()),
            line: meta.line(),
            time: chrono::Utc::now().to_rfc3339(),
        };
        let _ = self.tx.send(ev);
    }
}

/// Initialize the global logging system
///
/// `RUST_LOG` takes precedence over `AGENTDESK_LOG_LEVEL` (default `info`).
/// Calling it twice is harmless; the second subscriber install is ignored.
pub fn init_logging() {
    init_logging_with(true);
}

/// Like [`init_logging`], but events only reach stderr when `echo_stderr`
/// is set. Turn it off when a redacting log tail prints them instead.
pub fn init_logging_with(echo_stderr: bool) {
    let level = std::env::var("AGENTDESK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into());

    let tx = LOG_TX
        .get_or_init(|| {
            let (tx, _rx) = broadcast::channel(1024);
            tx
        })
        .clone();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer(echo_stderr))
        .with(BroadcastLayer { tx })
        .try_init();
}

fn stderr_layer<S>(enabled: bool) -> Option<impl Layer<S>>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    enabled.then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
}
