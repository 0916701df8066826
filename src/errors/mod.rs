// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod hub;
mod part;
mod registry;

pub use config::{ConfigError, ValidationError};
pub use hub::HubError;
pub use part::{PartError, ProduceCycleError};
pub use registry::RegistryError;
