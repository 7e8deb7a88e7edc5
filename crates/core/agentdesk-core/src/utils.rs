//! Utility functions

pub mod logger;

pub use logger::{init_logging, init_logging_with, subscribe_logs, LogEvent};
