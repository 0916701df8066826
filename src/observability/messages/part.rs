// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for per-part execution context events.

use crate::errors::ProduceCycleError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Execution context thread started.
///
/// # Log Level
/// `debug!`
pub struct ContextStarted<'a> {
    pub part: &'a str,
    pub kind: &'a str,
    pub has_inbox: bool,
    pub listener_count: usize,
}

impl Display for ContextStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let style = if self.has_inbox { "consumer" } else { "source" };
        write!(
            f,
            "Starting part '{}' ({}, {}) with {} listeners",
            self.part, self.kind, style, self.listener_count
        )
    }
}

impl StructuredLog for ContextStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            part = self.part,
            kind = self.kind,
            has_inbox = self.has_inbox,
            listener_count = self.listener_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "part",
            span_name = name,
            part = self.part,
            kind = self.kind,
        )
    }
}

/// A part's `init()` returned an error or panicked.
///
/// # Log Level
/// `error!` - The part will produce nothing for the rest of the run
pub struct PartInitFailed<'a> {
    pub part: &'a str,
    pub reason: &'a str,
}

impl Display for PartInitFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Part '{}' failed to initialize and will stay idle: {}",
            self.part, self.reason
        )
    }
}

impl StructuredLog for PartInitFailed<'_> {
    fn log(&self) {
        tracing::error!(part = self.part, reason = self.reason, "{}", self);
    }
}

/// One message handed to one listener.
///
/// # Log Level
/// `debug!`
pub struct MessageForwarded<'a> {
    pub part: &'a str,
    pub listener: &'a str,
}

impl Display for MessageForwarded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} -> {}", self.part, self.listener)
    }
}

impl StructuredLog for MessageForwarded<'_> {
    fn log(&self) {
        tracing::debug!(part = self.part, listener = self.listener, "{}", self);
    }
}

/// A produce/forward cycle failed; the context continues with the next cycle.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct CycleFailed<'a> {
    pub error: &'a ProduceCycleError,
}

impl Display for CycleFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Error processing queue: {}", self.error)
    }
}

impl StructuredLog for CycleFailed<'_> {
    fn log(&self) {
        tracing::error!(error = %self.error, "{}", self);
    }
}

/// The startup barrier was aborted because the hub failed to spawn a sibling.
///
/// # Log Level
/// `warn!`
pub struct ContextAborted<'a> {
    pub part: &'a str,
}

impl Display for ContextAborted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Part '{}' abandoned startup", self.part)
    }
}

impl StructuredLog for ContextAborted<'_> {
    fn log(&self) {
        tracing::warn!(part = self.part, "{}", self);
    }
}

/// Execution context observed the finished signal and exited.
///
/// # Log Level
/// `debug!`
pub struct ContextStopped<'a> {
    pub part: &'a str,
    pub cycles: u64,
}

impl Display for ContextStopped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Part '{}' stopped after {} cycles", self.part, self.cycles)
    }
}

impl StructuredLog for ContextStopped<'_> {
    fn log(&self) {
        tracing::debug!(part = self.part, cycles = self.cycles, "{}", self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarded_reads_like_an_arrow() {
        let msg = MessageForwarded {
            part: "ear",
            listener: "mind",
        };
        assert_eq!(msg.to_string(), "ear -> mind");
    }

    #[test]
    fn test_context_started_names_style() {
        let msg = ContextStarted {
            part: "ear",
            kind: "stdin_lines",
            has_inbox: false,
            listener_count: 1,
        };
        assert!(msg.to_string().contains("source"));
    }
}
