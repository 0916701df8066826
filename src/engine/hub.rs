// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The hub: load, link, spawn, and later stop a set of parts.
//!
//! # Lifecycle
//!
//! ```text
//! Created ─► Loading ─► Linking ─► Spawning ─► Ready ─► Running ─► ShuttingDown ─► Stopped
//! ```
//!
//! `start()` walks the first five transitions in strict order and returns once
//! every execution context has passed the startup barrier and the `ready`
//! signal is set. A failure while linking or spawning moves straight to
//! `Stopped`. A hub runs once; build a new one for a new run.
//!
//! # Shutdown
//!
//! `shutdown()` sets `finished`, then pushes a close sentinel into every inbox
//! so that consumers parked on an empty queue wake up. Contexts get the
//! configured grace period to exit. Sources blocked on their own external input
//! (a terminal read, for example) cannot be woken this way and are reported as
//! stalled.
//!
//! # Example
//! ```rust
//! use partwire::backends::BuiltinRegistry;
//! use partwire::config::{Config, Link};
//! use partwire::engine::{Hub, HubState};
//! use std::sync::Arc;
//!
//! let config = Config {
//!     modules: vec!["shout".to_string(), "screen".to_string()],
//!     module_map: vec![Link::new("shout", "screen")],
//!     ..Config::default()
//! };
//!
//! let registry = BuiltinRegistry::with_builtin_parts()
//!     .alias("shout", "change_text_case")
//!     .alias("screen", "console");
//!
//! let mut hub = Hub::new(config, Arc::new(registry));
//! hub.start()?;
//! assert_eq!(hub.state(), HubState::Running);
//! assert!(hub.signals().is_ready());
//!
//! let report = hub.shutdown();
//! assert!(report.is_clean());
//! assert_eq!(hub.state(), HubState::Stopped);
//! # Ok::<(), partwire::errors::HubError>(())
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::consts::SHUTDOWN_POLL_INTERVAL_MS;
use crate::config::{Config, PartMap, WiringGraph};
use crate::engine::context::{thread_builder, ExecutionContext};
use crate::engine::signals::{HubSignals, StartupBarrier};
use crate::errors::HubError;
use crate::observability::messages::{hub::*, StructuredLog};
use crate::traits::PluginRegistry;
use crate::wire::{mailbox, Inbox, Outlet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HubState {
    Created,
    Loading,
    Linking,
    Spawning,
    Ready,
    Running,
    ShuttingDown,
    Stopped,
}

/// Outcome of [`Hub::shutdown`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Contexts that exited within the grace period.
    pub stopped: Vec<String>,
    /// Contexts still running when the grace period ran out.
    pub stalled: Vec<String>,
}

impl ShutdownReport {
    pub fn is_clean(&self) -> bool {
        self.stalled.is_empty()
    }
}

pub struct Hub {
    config: Config,
    registry: Arc<dyn PluginRegistry>,
    graph: WiringGraph,
    signals: HubSignals,
    state: HubState,
    part_names: Vec<String>,
    /// One outlet per inbox, kept to deliver the close sentinel.
    closers: Vec<Outlet>,
    contexts: Vec<(String, JoinHandle<()>)>,
}

impl Hub {
    pub fn new(config: Config, registry: Arc<dyn PluginRegistry>) -> Self {
        let graph = WiringGraph::from_config(&config);
        Self {
            config,
            registry,
            graph,
            signals: HubSignals::new(),
            state: HubState::Created,
            part_names: Vec::new(),
            closers: Vec::new(),
            contexts: Vec::new(),
        }
    }

    /// Load, link and spawn every part, then block until all of them have
    /// initialized and passed the startup barrier.
    pub fn start(&mut self) -> Result<(), HubError> {
        if self.state != HubState::Created {
            return Err(HubError::AlreadyStarted);
        }
        let started = Instant::now();

        self.signals.ready().reset();
        self.signals.finished().reset();

        let starting = HubStarting {
            module_count: self.config.modules.len(),
            link_count: self.graph.len(),
        };
        let span = starting.span("hub_start");
        let _enter = span.enter();
        starting.log();

        self.state = HubState::Loading;
        let parts = self
            .registry
            .discover(&self.config.module_path, &self.config.modules);
        PartsLoaded {
            loaded: parts.len(),
            requested: self.config.modules.len(),
        }
        .log();

        self.state = HubState::Linking;
        if let Err(error) = self.graph.resolve(&parts) {
            LinkRejected { error: &error }.log();
            self.state = HubState::Stopped;
            return Err(error);
        }
        self.part_names = parts.names().cloned().collect();

        self.state = HubState::Spawning;
        let barrier = Arc::new(StartupBarrier::new(parts.len() + 1));
        self.spawn_contexts(parts, &barrier)?;
        ContextsSpawned {
            count: self.contexts.len(),
            barrier_parties: barrier.parties(),
        }
        .log();

        barrier.wait();
        self.state = HubState::Ready;
        self.signals.ready().set();
        HubReady {
            part_count: self.contexts.len(),
            startup: started.elapsed(),
        }
        .log();

        self.state = HubState::Running;
        Ok(())
    }

    fn spawn_contexts(
        &mut self,
        parts: PartMap,
        barrier: &Arc<StartupBarrier>,
    ) -> Result<(), HubError> {
        let mut outlets: HashMap<String, Outlet> = HashMap::new();
        let mut inboxes: HashMap<String, Inbox> = HashMap::new();
        for consumer in self.graph.consumers() {
            let (outlet, inbox) = mailbox(consumer);
            outlets.insert(consumer.to_string(), outlet);
            inboxes.insert(consumer.to_string(), inbox);
        }
        self.closers = outlets.values().cloned().collect();

        let idle_backoff = self.config.executor_options.idle_backoff();
        for (name, part) in parts {
            let outputs = self
                .graph
                .listeners_of(&name)
                .into_iter()
                .filter_map(|listener| outlets.get(listener).cloned())
                .collect();
            let context = ExecutionContext::new(
                name.clone(),
                part,
                inboxes.remove(&name),
                outputs,
                self.signals.clone(),
                Arc::clone(barrier),
                idle_backoff,
            );

            match thread_builder(&name).spawn(move || context.run()) {
                Ok(handle) => self.contexts.push((name, handle)),
                Err(source) => {
                    self.abort_startup(barrier);
                    return Err(HubError::SpawnFailed { part: name, source });
                }
            }
        }
        Ok(())
    }

    fn abort_startup(&mut self, barrier: &StartupBarrier) {
        barrier.abort();
        self.signals.finished().set();
        self.close_inboxes();
        for (name, handle) in self.contexts.drain(..) {
            if handle.join().is_err() {
                ContextPanicked { part: &name }.log();
            }
        }
        self.state = HubState::Stopped;
    }

    fn close_inboxes(&self) {
        for closer in &self.closers {
            closer.close();
        }
    }

    /// Request shutdown and wait up to `shutdown_grace_ms` for every context
    /// to exit. Calling it again retries any contexts that stalled.
    pub fn shutdown(&mut self) -> ShutdownReport {
        match self.state {
            HubState::Stopped => return ShutdownReport::default(),
            HubState::Created => {
                self.state = HubState::Stopped;
                return ShutdownReport::default();
            }
            _ => {}
        }

        let began = Instant::now();
        let grace = self.config.executor_options.shutdown_grace();
        self.state = HubState::ShuttingDown;
        HubShuttingDown {
            context_count: self.contexts.len(),
            grace,
        }
        .log();

        self.signals.finished().set();
        self.close_inboxes();

        let deadline = began + grace;
        let poll = Duration::from_millis(SHUTDOWN_POLL_INTERVAL_MS);
        while Instant::now() < deadline
            && self.contexts.iter().any(|(_, handle)| !handle.is_finished())
        {
            thread::sleep(poll.min(deadline.saturating_duration_since(Instant::now())));
        }

        let mut report = ShutdownReport::default();
        let mut still_running = Vec::new();
        for (name, handle) in self.contexts.drain(..) {
            if handle.is_finished() {
                if handle.join().is_err() {
                    ContextPanicked { part: &name }.log();
                }
                report.stopped.push(name);
            } else {
                report.stalled.push(name.clone());
                still_running.push((name, handle));
            }
        }
        self.contexts = still_running;

        if report.is_clean() {
            self.state = HubState::Stopped;
            HubStopped {
                stopped: report.stopped.len(),
                duration: began.elapsed(),
            }
            .log();
        } else {
            ShutdownStalled {
                stalled: &report.stalled,
            }
            .log();
        }
        report
    }

    pub fn signals(&self) -> &HubSignals {
        &self.signals
    }

    pub fn state(&self) -> HubState {
        self.state
    }

    /// Names of the parts that loaded, in spawn order. Empty before `start()`.
    pub fn part_names(&self) -> &[String] {
        &self.part_names
    }

    /// Listeners of `part`, in link declaration order.
    pub fn listeners_of(&self, part: &str) -> Vec<&str> {
        self.graph.listeners_of(part)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for Hub {
    fn drop(&mut self) {
        if !self.contexts.is_empty() {
            self.signals.finished().set();
            self.close_inboxes();
        }
    }
}

impl std::fmt::Debug for Hub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field("state", &self.state)
            .field("part_names", &self.part_names)
            .field("links", &self.graph.len())
            .finish()
    }
}
