// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;

use crate::config::{Config, Link, PartMap};
use crate::errors::HubError;

/// The ordered list of producer -> consumer links.
///
/// Link order is preserved: it decides the order of a producer's listeners,
/// and therefore the order of fan-out. Repeated links are kept.
///
/// # Example
/// ```
/// use partwire::config::WiringGraph;
///
/// let mut graph = WiringGraph::new();
/// graph.add_link("ear", "mind");
/// graph.add_link("ear", "log");
///
/// assert_eq!(graph.listeners_of("ear"), vec!["mind", "log"]);
/// assert!(graph.consumers().contains("log"));
/// assert!(graph.listeners_of("mind").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WiringGraph(pub Vec<Link>);

impl WiringGraph {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self(cfg.module_map.clone())
    }

    pub fn add_link(&mut self, producer: impl Into<String>, consumer: impl Into<String>) {
        self.0.push(Link::new(producer, consumer));
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.0.iter()
    }

    /// Listeners of `producer`, in declaration order.
    pub fn listeners_of(&self, producer: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|link| link.producer == producer)
            .map(|link| link.consumer.as_str())
            .collect()
    }

    /// Parts that need an inbound queue.
    pub fn consumers(&self) -> BTreeSet<&str> {
        self.0.iter().map(|link| link.consumer.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check every link against the loaded parts. Fails on the first link, in
    /// declaration order, that names a part which did not load.
    pub fn resolve(&self, parts: &PartMap) -> Result<(), HubError> {
        for link in &self.0 {
            for endpoint in [&link.producer, &link.consumer] {
                if !parts.contains_key(endpoint) {
                    return Err(HubError::UnknownPartReference {
                        producer: link.producer.clone(),
                        consumer: link.consumer.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl From<Vec<Link>> for WiringGraph {
    fn from(links: Vec<Link>) -> Self {
        Self(links)
    }
}

impl From<WiringGraph> for Vec<Link> {
    fn from(graph: WiringGraph) -> Self {
        graph.0
    }
}
