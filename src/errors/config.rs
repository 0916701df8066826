// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while validating a hub configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A module name appears more than once in `modules`
    #[error("Duplicate module name: '{module}'")]
    DuplicateModule {
        /// The repeated module name
        module: String,
    },
    /// A `module_map` entry names a module that is not enabled in `modules`
    #[error(
        "Link '{producer}' -> '{consumer}' references '{missing}' which is not listed in modules"
    )]
    UnlistedLinkEndpoint {
        producer: String,
        consumer: String,
        /// The endpoint that could not be found in `modules`
        missing: String,
    },
}

/// Errors raised while reading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config '{}': {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse TOML config '{}': {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Configuration validation failed:\n{}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
