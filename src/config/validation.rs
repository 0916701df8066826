// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation for module names and wiring links.
//!
//! Validation runs before a hub is constructed and catches mistakes that would
//! otherwise surface as an `UnknownPartReference` at `start()`:
//!
//! 1. **Uniqueness**: every name in `modules` appears once
//! 2. **Link endpoints**: both ends of every `module_map` entry are enabled modules
//!
//! Cycles are deliberately allowed: a message hub may carry feedback loops.
//! Duplicate links and self links are legal too, but are logged as warnings.
//!
//! # Example
//! ```rust
//! use partwire::config::{validate_config, Config, Link};
//! use partwire::errors::ValidationError;
//!
//! let config = Config {
//!     modules: vec!["ear".to_string()],
//!     module_map: vec![Link::new("ear", "mind")],
//!     ..Config::default()
//! };
//!
//! let errors = validate_config(&config).unwrap_err();
//! assert!(matches!(
//!     &errors[0],
//!     ValidationError::UnlistedLinkEndpoint { missing, .. } if missing == "mind"
//! ));
//! ```

use std::collections::{HashMap, HashSet};

use crate::config::Config;
use crate::errors::ValidationError;
use crate::observability::messages::{validation::*, StructuredLog};

/// Validate a configuration, accumulating every error found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(duplicate_errors) = validate_unique_modules(config) {
        errors.extend(duplicate_errors);
    }

    if let Err(link_errors) = validate_link_endpoints(config) {
        errors.extend(link_errors);
    }

    warn_on_suspicious_links(config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_modules(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut errors = Vec::new();

    for module in &config.modules {
        if !seen.insert(module.as_str()) && reported.insert(module.as_str()) {
            DuplicateModuleDetected { module }.log();
            errors.push(ValidationError::DuplicateModule {
                module: module.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_link_endpoints(config: &Config) -> Result<(), Vec<ValidationError>> {
    let enabled: HashSet<&str> = config.modules.iter().map(String::as_str).collect();
    let mut errors = Vec::new();

    for link in &config.module_map {
        for endpoint in [&link.producer, &link.consumer] {
            if !enabled.contains(endpoint.as_str()) {
                UnlistedLinkEndpoint {
                    producer: &link.producer,
                    consumer: &link.consumer,
                    missing: endpoint,
                }
                .log();
                errors.push(ValidationError::UnlistedLinkEndpoint {
                    producer: link.producer.clone(),
                    consumer: link.consumer.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn warn_on_suspicious_links(config: &Config) {
    let mut occurrences: HashMap<(&str, &str), usize> = HashMap::new();
    for link in &config.module_map {
        if link.producer == link.consumer {
            SelfLinkWarning {
                module: &link.producer,
            }
            .log();
        }
        *occurrences
            .entry((link.producer.as_str(), link.consumer.as_str()))
            .or_default() += 1;
    }

    for ((producer, consumer), count) in occurrences {
        if count > 1 {
            DuplicateLinkWarning {
                producer,
                consumer,
                occurrences: count,
            }
            .log();
        }
    }
}
