// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Thread coordination primitives for a hub run.
//!
//! * [`Signal`]: a one-shot flag that threads can block on
//! * [`HubSignals`]: the `ready`/`finished` pair shared by the hub and every
//!   execution context
//! * [`StartupBarrier`]: an `N+1` rendezvous that the hub can abort if it
//!   fails part way through spawning
//!
//! All of these are plain `Mutex` + `Condvar` constructions. Execution contexts
//! run on OS threads and block for real, so async primitives do not fit here.
//! Lock poisoning is ignored: the protected state is a few booleans and
//! counters that are always left consistent.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A monotone flag: once set, it stays set and every waiter is released.
///
/// # Example
/// ```
/// use partwire::engine::Signal;
/// use std::sync::Arc;
/// use std::thread;
///
/// let signal = Arc::new(Signal::new());
/// let waiter = {
///     let signal = Arc::clone(&signal);
///     thread::spawn(move || signal.wait())
/// };
///
/// signal.set();
/// waiter.join().unwrap();
/// assert!(signal.is_set());
/// ```
#[derive(Debug, Default)]
pub struct Signal {
    flag: Mutex<bool>,
    changed: Condvar,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        let mut flag = lock(&self.flag);
        if !*flag {
            *flag = true;
            self.changed.notify_all();
        }
    }

    /// Clear the flag. Only `Hub::start` does this, before any waiter exists.
    pub(crate) fn reset(&self) {
        *lock(&self.flag) = false;
    }

    pub fn is_set(&self) -> bool {
        *lock(&self.flag)
    }

    /// Block until the flag is set.
    pub fn wait(&self) {
        let mut flag = lock(&self.flag);
        while !*flag {
            flag = self
                .changed
                .wait(flag)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Block until the flag is set or `timeout` elapses. Returns whether the
    /// flag is set.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut flag = lock(&self.flag);
        while !*flag {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            flag = self
                .changed
                .wait_timeout(flag, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
        *flag
    }
}

/// The hub's readiness and shutdown flags.
///
/// Cloning is cheap and every clone observes the same pair of signals. This is
/// the only view of the hub a part ever gets.
#[derive(Debug, Clone, Default)]
pub struct HubSignals {
    ready: Arc<Signal>,
    finished: Arc<Signal>,
}

impl HubSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every execution context has passed the startup barrier.
    pub fn is_ready(&self) -> bool {
        self.ready.is_set()
    }

    /// Shutdown has been requested.
    pub fn is_finished(&self) -> bool {
        self.finished.is_set()
    }

    pub fn wait_ready(&self) {
        self.ready.wait()
    }

    pub fn wait_finished(&self) {
        self.finished.wait()
    }

    pub fn wait_finished_timeout(&self, timeout: Duration) -> bool {
        self.finished.wait_timeout(timeout)
    }

    pub(crate) fn ready(&self) -> &Signal {
        &self.ready
    }

    pub(crate) fn finished(&self) -> &Signal {
        &self.finished
    }
}

/// How a thread left [`StartupBarrier::wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierOutcome {
    /// Every party arrived.
    Released,
    /// The hub gave up on startup; the caller must not start producing.
    Aborted,
}

#[derive(Debug)]
struct BarrierState {
    arrived: usize,
    released: bool,
    aborted: bool,
}

/// Single-use rendezvous for `parties` threads.
///
/// Unlike `std::sync::Barrier` it can be aborted, which releases every waiter
/// with [`BarrierOutcome::Aborted`]. The hub needs this when spawning fails
/// after some contexts are already parked at the barrier.
#[derive(Debug)]
pub struct StartupBarrier {
    parties: usize,
    state: Mutex<BarrierState>,
    changed: Condvar,
}

impl StartupBarrier {
    pub fn new(parties: usize) -> Self {
        Self {
            parties,
            state: Mutex::new(BarrierState {
                arrived: 0,
                released: false,
                aborted: false,
            }),
            changed: Condvar::new(),
        }
    }

    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Arrive and block until all parties have arrived or the barrier is aborted.
    pub fn wait(&self) -> BarrierOutcome {
        let mut state = lock(&self.state);
        if state.aborted {
            return BarrierOutcome::Aborted;
        }

        state.arrived += 1;
        if state.arrived >= self.parties {
            state.released = true;
            self.changed.notify_all();
            return BarrierOutcome::Released;
        }

        while !state.released && !state.aborted {
            state = self
                .changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        if state.released {
            BarrierOutcome::Released
        } else {
            BarrierOutcome::Aborted
        }
    }

    /// Release every current and future waiter with `Aborted`. No effect once
    /// the barrier has released.
    pub fn abort(&self) {
        let mut state = lock(&self.state);
        if !state.released {
            state.aborted = true;
            self.changed.notify_all();
        }
    }
}
