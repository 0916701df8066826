// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for plugin discovery.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Scanning one module search path.
///
/// # Log Level
/// `info!`
pub struct SearchPathScanning<'a> {
    pub path: &'a Path,
}

impl Display for SearchPathScanning<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Loading modules <- {}", self.path.display())
    }
}

impl StructuredLog for SearchPathScanning<'_> {
    fn log(&self) {
        tracing::info!(path = %self.path.display(), "{}", self);
    }
}

/// A search path could not be listed; discovery continues with the next one.
///
/// # Log Level
/// `warn!`
pub struct SearchPathSkipped<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for SearchPathSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Skipping module path: {}", self.error)
    }
}

impl StructuredLog for SearchPathSkipped<'_> {
    fn log(&self) {
        tracing::warn!(error = %self.error, "{}", self);
    }
}

/// A part was materialized.
///
/// # Log Level
/// `info!`
pub struct PartMaterialized<'a> {
    pub name: &'a str,
    pub kind: &'a str,
    pub location: &'a str,
}

impl Display for PartMaterialized<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} <- {} ({})", self.name, self.location, self.kind)
    }
}

impl StructuredLog for PartMaterialized<'_> {
    fn log(&self) {
        tracing::info!(
            name = self.name,
            kind = self.kind,
            location = self.location,
            "{}", self
        );
    }
}

/// A discovered module failed to materialize and was skipped.
///
/// # Log Level
/// `error!` - Failure requiring attention; the hub keeps loading other parts
pub struct PluginSkipped<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for PluginSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Error loading part, skipping: {}", self.error)
    }
}

impl StructuredLog for PluginSkipped<'_> {
    fn log(&self) {
        tracing::error!(error = %self.error, "{}", self);
    }
}

/// An enabled module was not found anywhere on the search path.
///
/// # Log Level
/// `warn!`
pub struct EnabledModuleNotFound<'a> {
    pub name: &'a str,
}

impl Display for EnabledModuleNotFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Enabled module '{}' was not found on the module path", self.name)
    }
}

impl StructuredLog for EnabledModuleNotFound<'_> {
    fn log(&self) {
        tracing::warn!(name = self.name, "{}", self);
    }
}

/// A module directory was ignored because an earlier search path already provided the name.
///
/// # Log Level
/// `debug!`
pub struct ModuleShadowed<'a> {
    pub name: &'a str,
    pub path: &'a Path,
}

impl Display for ModuleShadowed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Ignoring '{}' at {}: already loaded from an earlier module path",
            self.name,
            self.path.display()
        )
    }
}

impl StructuredLog for ModuleShadowed<'_> {
    fn log(&self) {
        tracing::debug!(name = self.name, path = %self.path.display(), "{}", self);
    }
}
