// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Messages are organized by subsystem:
//!
//! * `hub` - hub lifecycle (load, link, spawn, readiness, shutdown)
//! * `part` - per-part execution context events
//! * `registry` - plugin discovery and materialization
//! * `validation` - configuration validation warnings and errors
//! * `dispatch` - command dispatch inside the `command_dispatch` part

use tracing::Span;

pub mod dispatch;
pub mod hub;
pub mod part;
pub mod registry;
pub mod validation;

/// Emit a message as a structured tracing event.
pub trait StructuredLog {
    /// Log the event at its documented level, with structured fields.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("partwire", span_name = name)
    }
}
