// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod integration_tests {
    use crate::backends::{BuiltinRegistry, DirectoryRegistry};
    use crate::config::{load_and_validate_config, Link, WiringGraph};
    use crate::traits::PluginRegistry;
    use std::time::Duration;

    /// The shipped echo configuration loads, validates and wires up
    #[test]
    fn test_echo_yaml_loading() {
        let config = load_and_validate_config("configs/echo.yaml").unwrap();

        assert_eq!(config.modules, vec!["keyboard", "mind", "shout", "screen"]);
        assert_eq!(
            config.module_map,
            vec![
                Link::new("keyboard", "mind"),
                Link::new("mind", "shout"),
                Link::new("shout", "screen"),
            ]
        );
        assert_eq!(config.executor_options.idle_backoff(), Duration::from_millis(5));
    }

    /// Every link in the echo configuration resolves against the shipped parts
    #[test]
    fn test_echo_parts_resolve() {
        let config = load_and_validate_config("configs/echo.yaml").unwrap();
        let registry = DirectoryRegistry::new(BuiltinRegistry::with_builtin_parts());

        let parts = registry.discover(&config.module_path, &config.modules);
        assert_eq!(parts.len(), 4);
        assert_eq!(parts.get("mind").map(|p| p.kind()), Some("command_dispatch"));
        assert_eq!(parts.get("shout").map(|p| p.kind()), Some("change_text_case"));

        let graph = WiringGraph::from_config(&config);
        assert!(graph.resolve(&parts).is_ok());
        assert_eq!(graph.listeners_of("keyboard"), vec!["mind"]);
        assert!(graph.listeners_of("screen").is_empty());
    }

    /// The TOML variant parses to the same shape
    #[test]
    fn test_echo_toml_loading() {
        let config = load_and_validate_config("configs/echo.toml").unwrap();

        assert_eq!(config.modules, vec!["keyboard", "shout", "screen"]);
        assert_eq!(WiringGraph::from_config(&config).listeners_of("shout"), vec!["screen"]);
        assert_eq!(
            config.executor_options.shutdown_grace(),
            Duration::from_millis(500)
        );
    }
}
