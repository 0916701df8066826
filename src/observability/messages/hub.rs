// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for hub lifecycle events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Hub `start()` entered.
///
/// # Log Level
/// `info!` - Important operational event
pub struct HubStarting {
    pub module_count: usize,
    pub link_count: usize,
}

impl Display for HubStarting {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting hub: {} enabled modules, {} links",
            self.module_count, self.link_count
        )
    }
}

impl StructuredLog for HubStarting {
    fn log(&self) {
        tracing::info!(
            module_count = self.module_count,
            link_count = self.link_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "hub_start",
            span_name = name,
            module_count = self.module_count,
            link_count = self.link_count,
        )
    }
}

/// Load phase finished.
///
/// # Log Level
/// `info!` when every enabled module loaded, `warn!` otherwise
pub struct PartsLoaded {
    pub loaded: usize,
    pub requested: usize,
}

impl Display for PartsLoaded {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded {} of {} enabled parts",
            self.loaded, self.requested
        )
    }
}

impl StructuredLog for PartsLoaded {
    fn log(&self) {
        if self.loaded < self.requested {
            tracing::warn!(loaded = self.loaded, requested = self.requested, "{}", self);
        } else {
            tracing::info!(loaded = self.loaded, requested = self.requested, "{}", self);
        }
    }
}

/// A link was rejected during the link phase, aborting startup.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct LinkRejected<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for LinkRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Hub start aborted before spawn: {}", self.error)
    }
}

impl StructuredLog for LinkRejected<'_> {
    fn log(&self) {
        tracing::error!(error = %self.error, "{}", self);
    }
}

/// Every execution context has been spawned; the hub is about to wait at the barrier.
///
/// # Log Level
/// `debug!`
pub struct ContextsSpawned {
    pub count: usize,
    pub barrier_parties: usize,
}

impl Display for ContextsSpawned {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Spawned {} execution contexts, waiting at startup barrier ({} parties)",
            self.count, self.barrier_parties
        )
    }
}

impl StructuredLog for ContextsSpawned {
    fn log(&self) {
        tracing::debug!(
            count = self.count,
            barrier_parties = self.barrier_parties,
            "{}", self
        );
    }
}

/// Startup barrier released and readiness signalled.
///
/// # Log Level
/// `info!` - Important operational event
pub struct HubReady {
    pub part_count: usize,
    pub startup: Duration,
}

impl Display for HubReady {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Hub ready: {} parts running (startup took {:?})",
            self.part_count, self.startup
        )
    }
}

impl StructuredLog for HubReady {
    fn log(&self) {
        tracing::info!(
            part_count = self.part_count,
            startup_ms = self.startup.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "hub_ready",
            span_name = name,
            part_count = self.part_count,
            startup = ?self.startup,
        )
    }
}

/// Finished signal set.
///
/// # Log Level
/// `info!` - Important operational event
pub struct HubShuttingDown {
    pub context_count: usize,
    pub grace: Duration,
}

impl Display for HubShuttingDown {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Shutting down hub: waiting up to {:?} for {} execution contexts",
            self.grace, self.context_count
        )
    }
}

impl StructuredLog for HubShuttingDown {
    fn log(&self) {
        tracing::info!(
            context_count = self.context_count,
            grace_ms = self.grace.as_millis() as u64,
            "{}", self
        );
    }
}

/// All execution contexts exited.
///
/// # Log Level
/// `info!` - Important operational event
pub struct HubStopped {
    pub stopped: usize,
    pub duration: Duration,
}

impl Display for HubStopped {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Hub stopped: {} execution contexts exited in {:?}",
            self.stopped, self.duration
        )
    }
}

impl StructuredLog for HubStopped {
    fn log(&self) {
        tracing::info!(
            stopped = self.stopped,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// Some contexts did not exit within the grace period.
///
/// # Log Level
/// `warn!` - Contexts blocked inside a produce step
pub struct ShutdownStalled<'a> {
    pub stalled: &'a [String],
}

impl Display for ShutdownStalled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Execution contexts still blocked after shutdown grace period: {}",
            self.stalled.join(", ")
        )
    }
}

impl StructuredLog for ShutdownStalled<'_> {
    fn log(&self) {
        tracing::warn!(
            stalled = self.stalled.join(", "),
            stalled_count = self.stalled.len(),
            "{}", self
        );
    }
}

/// An execution context thread terminated by panic outside the guarded cycle.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ContextPanicked<'a> {
    pub part: &'a str,
}

impl Display for ContextPanicked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Execution context for part '{}' panicked", self.part)
    }
}

impl StructuredLog for ContextPanicked<'_> {
    fn log(&self) {
        tracing::error!(part = self.part, "{}", self);
    }
}
