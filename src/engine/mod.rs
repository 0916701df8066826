// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod context;
pub mod hub;
pub mod signals;
#[cfg(test)]
mod integration_tests;

pub use hub::{Hub, HubState, ShutdownReport};
pub use signals::{BarrierOutcome, HubSignals, Signal, StartupBarrier};
