//! Telemetry utilities for command timing and spans.

use std::time::Instant;

/// Guard for timing command execution and recording metrics.
///
/// Records command latency when dropped.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_command(&self.command, duration);
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for one dispatched command.
    pub fn command(name: &str, user: Option<&str>) -> Span {
        if let Some(user) = user {
            info_span!("command", name = %name, user = %user)
        } else {
            info_span!("command", name = %name)
        }
    }

    /// Create a span for one tracking operation.
    pub fn tracking(op: &'static str, nickname: &str) -> Span {
        info_span!("tracking", op = op, nickname = %nickname)
    }
}
