// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::sync::Arc;

use anyhow::{bail, Context};
use partwire::backends::{BuiltinRegistry, DirectoryRegistry};
use partwire::config::load_and_validate_config;
use partwire::engine::Hub;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .init();
}

/// The single configuration path from argv, or usage on stderr.
fn config_path(args: impl IntoIterator<Item = String>) -> anyhow::Result<String> {
    let mut args = args.into_iter();
    let program = args.next().unwrap_or_else(|| "partwire".into());
    match (args.next(), args.next()) {
        (Some(path), None) => Ok(path),
        _ => {
            eprintln!("Usage: {program} <config.yaml|config.toml>");
            eprintln!("Example: {program} configs/echo.yaml");
            bail!("expected exactly one configuration file");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let path = config_path(env::args())?;
    let config = load_and_validate_config(&path)
        .with_context(|| format!("loading configuration from {path}"))?;
    let registry = Arc::new(DirectoryRegistry::new(BuiltinRegistry::with_builtin_parts()));
    let mut hub = Hub::new(config, registry);

    // start() and shutdown() block on OS threads; keep them off the runtime workers.
    let mut hub = tokio::task::spawn_blocking(move || hub.start().map(|()| hub))
        .await
        .context("hub startup task failed")??;

    tracing::info!(parts = ?hub.part_names(), "hub running, press Ctrl-C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("waiting for Ctrl-C")?;

    let report = tokio::task::spawn_blocking(move || hub.shutdown())
        .await
        .context("hub shutdown task failed")?;

    if !report.is_clean() {
        tracing::warn!(
            stalled = ?report.stalled,
            "some parts did not stop in time (a source blocked on input cannot be interrupted)"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_config_path_takes_exactly_one_argument() {
        assert_eq!(config_path(argv(&["partwire", "configs/echo.yaml"])).unwrap(), "configs/echo.yaml");
        assert!(config_path(argv(&["partwire"])).is_err());
        assert!(config_path(argv(&["partwire", "a.yaml", "b.yaml"])).is_err());
    }

    #[test]
    fn test_empty_argv_is_a_usage_error() {
        assert!(config_path(Vec::new()).is_err());
    }
}
