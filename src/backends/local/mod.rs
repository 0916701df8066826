// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod command;
pub mod factory;
pub mod parts;

pub use command::{Command, CommandTable, DispatchContext, InvokeHandle, DEFAULT_MIND};
pub use factory::BuiltinRegistry;
pub use parts::*;

use serde::de::DeserializeOwned;

use crate::errors::PartError;
use crate::traits::PartOptions;

/// Deserialize a part's loose option map into its typed options struct.
pub(crate) fn parse_options<T: DeserializeOwned>(options: &PartOptions) -> Result<T, PartError> {
    let mapping: serde_yaml::Mapping = options
        .iter()
        .map(|(key, value)| (serde_yaml::Value::String(key.clone()), value.clone()))
        .collect();
    serde_yaml::from_value(serde_yaml::Value::Mapping(mapping))
        .map_err(|e| PartError::InvalidOptions(e.to_string()))
}
