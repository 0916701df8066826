// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The per-part run loop.
//!
//! ```text
//! init ──► barrier ──► wait ready ──► loop { produce ─► forward to every listener }
//!                                         until finished
//! ```
//!
//! Everything that can go wrong inside the loop (a produced `Err`, a closed
//! listener inbox, a panic) is logged as a [`ProduceCycleError`] and the next
//! cycle runs anyway. A part whose `init` fails still takes its place at the
//! barrier so the rest of the hub can start, then sits idle until shutdown.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::engine::signals::{BarrierOutcome, HubSignals, StartupBarrier};
use crate::errors::ProduceCycleError;
use crate::observability::messages::{part::*, StructuredLog};
use crate::traits::{Part, PartContext};
use crate::wire::{Inbox, Message, Outlet};

/// Result of one produce/forward cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CycleOutcome {
    /// The sequence ran to completion; carries how many messages it yielded.
    Completed(usize),
    Failed,
}

pub(crate) struct ExecutionContext {
    name: String,
    part: Box<dyn Part>,
    inbox: Option<Inbox>,
    outputs: Vec<Outlet>,
    signals: HubSignals,
    barrier: Arc<StartupBarrier>,
    idle_backoff: Duration,
}

impl ExecutionContext {
    pub(crate) fn new(
        name: String,
        part: Box<dyn Part>,
        inbox: Option<Inbox>,
        outputs: Vec<Outlet>,
        signals: HubSignals,
        barrier: Arc<StartupBarrier>,
        idle_backoff: Duration,
    ) -> Self {
        Self {
            name,
            part,
            inbox,
            outputs,
            signals,
            barrier,
            idle_backoff,
        }
    }

    /// Thread body. Returns when the hub's finished signal is observed or
    /// startup is aborted.
    pub(crate) fn run(mut self) {
        let started = ContextStarted {
            part: &self.name,
            kind: self.part.kind(),
            has_inbox: self.inbox.is_some(),
            listener_count: self.outputs.len(),
        };
        let span = started.span("execution_context");
        let _enter = span.enter();
        started.log();

        let initialized = self.initialize();
        if !initialized {
            // Never read again; producers now see a closed listener.
            drop(self.inbox.take());
        }

        if self.barrier.wait() == BarrierOutcome::Aborted {
            ContextAborted { part: &self.name }.log();
            return;
        }
        self.signals.wait_ready();

        let mut cycles = 0u64;
        if initialized {
            while !self.signals.is_finished() {
                let outcome = self.cycle();
                cycles += 1;

                if outcome == CycleOutcome::Completed(0)
                    && self.inbox.is_none()
                    && !self.idle_backoff.is_zero()
                {
                    self.signals.wait_finished_timeout(self.idle_backoff);
                }
            }
        } else {
            self.signals.wait_finished();
        }

        ContextStopped {
            part: &self.name,
            cycles,
        }
        .log();
    }

    fn initialize(&mut self) -> bool {
        let part = &mut self.part;
        match panic::catch_unwind(AssertUnwindSafe(|| part.init())) {
            Ok(Ok(())) => true,
            Ok(Err(error)) => {
                PartInitFailed {
                    part: &self.name,
                    reason: &error.to_string(),
                }
                .log();
                false
            }
            Err(payload) => {
                PartInitFailed {
                    part: &self.name,
                    reason: &format!("panicked: {}", panic_message(payload.as_ref())),
                }
                .log();
                false
            }
        }
    }

    /// Run `produce` once and forward every message it yields, in order.
    pub(crate) fn cycle(&mut self) -> CycleOutcome {
        let name = self.name.as_str();
        let outputs = self.outputs.as_slice();
        let part = &mut self.part;
        let signals = &self.signals;
        let inbox = &mut self.inbox;

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut ctx = PartContext::new(name, signals, inbox.as_mut());
            let mut yielded = 0usize;
            for item in part.produce(&mut ctx) {
                match item {
                    Ok(message) => {
                        yielded += 1;
                        forward(name, outputs, message);
                    }
                    Err(source) => {
                        return Err(ProduceCycleError::Produce {
                            part: name.to_string(),
                            source,
                        })
                    }
                }
            }
            Ok(yielded)
        }));

        let error = match result {
            Ok(Ok(yielded)) => return CycleOutcome::Completed(yielded),
            Ok(Err(error)) => error,
            Err(payload) => ProduceCycleError::Panicked {
                part: name.to_string(),
                message: panic_message(payload.as_ref()),
            },
        };
        CycleFailed { error: &error }.log();
        CycleOutcome::Failed
    }
}

/// Hand one message to every listener. A listener whose inbox is gone is
/// logged and skipped; the others still receive the message.
fn forward(part: &str, outputs: &[Outlet], message: Message) {
    for outlet in outputs {
        match outlet.deliver(message.clone()) {
            Ok(()) => MessageForwarded {
                part,
                listener: outlet.listener(),
            }
            .log(),
            Err(_) => CycleFailed {
                error: &ProduceCycleError::Forward {
                    part: part.to_string(),
                    listener: outlet.listener().to_string(),
                },
            }
            .log(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Name the OS thread after the part so log lines carry it.
pub(crate) fn thread_builder(part: &str) -> thread::Builder {
    thread::Builder::new().name(part.to_string())
}
