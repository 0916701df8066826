// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod part_map;
mod validation;
mod wiring;

#[cfg(test)]
mod integration_tests;
pub mod consts;

pub use loader::{load_and_validate_config, load_config, Config, ExecutorOptions, Link};
pub use part_map::PartMap;
pub use validation::validate_config;
pub use wiring::WiringGraph;
