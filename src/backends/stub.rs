// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Scripted parts for exercising the hub in tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::errors::PartError;
use crate::traits::{emit, fail, nothing, Part, PartContext, Produced};
use crate::wire::Message;

/// Yields nothing, forever.
pub struct Idle;

impl Part for Idle {
    fn produce(&mut self, _ctx: &mut PartContext<'_>) -> Produced {
        nothing()
    }

    fn kind(&self) -> &'static str {
        "idle"
    }
}

/// Source that plays back one scripted step per cycle, then yields nothing.
pub struct ScriptedSource {
    script: VecDeque<Result<Vec<&'static str>, PartError>>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<Vec<&'static str>, PartError>>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl Part for ScriptedSource {
    fn produce(&mut self, _ctx: &mut PartContext<'_>) -> Produced {
        match self.script.pop_front() {
            Some(Ok(texts)) => emit(texts.into_iter().map(Message::text).collect::<Vec<_>>()),
            Some(Err(error)) => fail(error),
            None => nothing(),
        }
    }

    fn kind(&self) -> &'static str {
        "scripted_source"
    }
}

/// Messages a [`Recorder`] has taken off its inbox.
pub type Recording = Arc<Mutex<Vec<Message>>>;

/// Consumer that keeps every message it receives and yields nothing.
pub struct Recorder {
    received: Recording,
}

impl Recorder {
    pub fn new(received: Recording) -> Self {
        Self { received }
    }
}

impl Part for Recorder {
    fn produce(&mut self, ctx: &mut PartContext<'_>) -> Produced {
        if let Some(message) = ctx.recv() {
            self.received.lock().unwrap().push(message);
        }
        nothing()
    }

    fn kind(&self) -> &'static str {
        "recorder"
    }
}

/// Consumer that passes every inbound message straight on.
pub struct Relay;

impl Part for Relay {
    fn produce(&mut self, ctx: &mut PartContext<'_>) -> Produced {
        match ctx.recv() {
            Some(message) => emit([message]),
            None => nothing(),
        }
    }

    fn kind(&self) -> &'static str {
        "relay"
    }
}

/// Source that panics on cycle `panic_on` (1-based) and yields "survived" on
/// the cycle right after.
pub struct Panicking {
    cycle: usize,
    panic_on: usize,
}

impl Panicking {
    pub fn on_cycle(panic_on: usize) -> Self {
        Self { cycle: 0, panic_on }
    }
}

impl Part for Panicking {
    fn produce(&mut self, _ctx: &mut PartContext<'_>) -> Produced {
        self.cycle += 1;
        if self.cycle == self.panic_on {
            panic!("scripted panic on cycle {}", self.cycle);
        }
        if self.cycle == self.panic_on + 1 {
            return emit([Message::text("survived")]);
        }
        nothing()
    }

    fn kind(&self) -> &'static str {
        "panicking"
    }
}

/// Shared, ordered record of lifecycle events across parts.
pub type Journal = Arc<Mutex<Vec<String>>>;

/// Journals `init:<name>` and, on its first cycle, `produce:<name>`. Init can
/// be slowed down or made to fail.
pub struct InitWitness {
    name: String,
    journal: Journal,
    init_delay: Duration,
    fail_init: bool,
    produced: bool,
}

impl InitWitness {
    pub fn new(name: &str, journal: Journal) -> Self {
        Self {
            name: name.to_string(),
            journal,
            init_delay: Duration::ZERO,
            fail_init: false,
            produced: false,
        }
    }

    pub fn slow(mut self, delay: Duration) -> Self {
        self.init_delay = delay;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_init = true;
        self
    }
}

impl Part for InitWitness {
    fn init(&mut self) -> Result<(), PartError> {
        thread::sleep(self.init_delay);
        self.journal.lock().unwrap().push(format!("init:{}", self.name));
        if self.fail_init {
            return Err(PartError::failed("scripted init failure"));
        }
        Ok(())
    }

    fn produce(&mut self, ctx: &mut PartContext<'_>) -> Produced {
        if !self.produced {
            self.produced = true;
            let ready = if ctx.hub().is_ready() { "ready" } else { "not-ready" };
            self.journal
                .lock()
                .unwrap()
                .push(format!("produce:{}:{}", self.name, ready));
        }
        nothing()
    }

    fn kind(&self) -> &'static str {
        "init_witness"
    }
}

/// Counts payloads created and payloads released.
#[derive(Debug, Default)]
pub struct Tally {
    made: AtomicUsize,
    dropped: AtomicUsize,
}

impl Tally {
    pub fn made(&self) -> usize {
        self.made.load(Ordering::SeqCst)
    }

    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::SeqCst)
    }

    /// Payloads created but not yet released anywhere.
    pub fn retained(&self) -> usize {
        self.made().saturating_sub(self.dropped())
    }

    pub fn payload(self: &Arc<Self>) -> Message {
        self.made.fetch_add(1, Ordering::SeqCst);
        Message::new(Tallied(Arc::clone(self)))
    }
}

struct Tallied(Arc<Tally>);

impl Drop for Tallied {
    fn drop(&mut self) {
        self.0.dropped.fetch_add(1, Ordering::SeqCst);
    }
}

/// Source emitting one tallied payload per cycle.
pub struct Ticker(pub Arc<Tally>);

impl Part for Ticker {
    fn produce(&mut self, _ctx: &mut PartContext<'_>) -> Produced {
        emit(vec![self.0.payload()])
    }

    fn kind(&self) -> &'static str {
        "ticker"
    }
}
