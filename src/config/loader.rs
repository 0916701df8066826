// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_IDLE_BACKOFF_MS, DEFAULT_SHUTDOWN_GRACE_MS};
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Hub configuration.
///
/// # Fields
/// * `module_path` - Directories searched, in order, for pluggable parts
/// * `modules` - Names of the parts to materialize; anything else found is ignored
/// * `module_map` - Ordered `[producer, consumer]` links forming the wiring graph
/// * `executor_options` - Execution context tuning (optional)
///
/// # Example
/// ```yaml
/// module_path: [parts]
/// modules: [ear, mind, screen]
/// module_map:
///   - [ear, mind]
///   - [mind, screen]
/// executor_options:
///   idle_backoff_ms: 10
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub module_path: Vec<PathBuf>,
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub module_map: Vec<Link>,
    #[serde(default)]
    pub executor_options: ExecutorOptions,
}

/// One edge of the wiring graph: every message `producer` yields is enqueued
/// on `consumer`'s inbox.
///
/// Deserializes from a two-element sequence, `[producer, consumer]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "(String, String)")]
pub struct Link {
    pub producer: String,
    pub consumer: String,
}

impl Link {
    pub fn new(producer: impl Into<String>, consumer: impl Into<String>) -> Self {
        Self {
            producer: producer.into(),
            consumer: consumer.into(),
        }
    }
}

impl From<(String, String)> for Link {
    fn from((producer, consumer): (String, String)) -> Self {
        Self { producer, consumer }
    }
}

/// Execution context options.
///
/// # Fields
/// * `idle_backoff_ms` - Pause after a source cycle that yielded nothing (defaults to 5)
/// * `shutdown_grace_ms` - How long `shutdown()` waits for contexts (defaults to 2000)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutorOptions {
    pub idle_backoff_ms: Option<u64>,
    pub shutdown_grace_ms: Option<u64>,
}

impl ExecutorOptions {
    pub fn idle_backoff(&self) -> Duration {
        Duration::from_millis(self.idle_backoff_ms.unwrap_or(DEFAULT_IDLE_BACKOFF_MS))
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms.unwrap_or(DEFAULT_SHUTDOWN_GRACE_MS))
    }
}

/// Load a config from a YAML file, or TOML when the extension is `.toml`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load a config and reject it if module names or links are inconsistent.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}
