// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // plugin registries + built-in parts
pub mod config;     // config, wiring graph, part map
pub mod engine;     // hub + execution contexts
pub mod errors;     // error handling
pub mod observability;
pub mod traits;     // part + registry contracts
pub mod wire;       // messages + inbound queues
