// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use super::parts::*;
use crate::config::PartMap;
use crate::errors::{PartError, RegistryError};
use crate::observability::messages::{registry::*, StructuredLog};
use crate::traits::{Part, PartConstructor, PartOptions, PluginRegistry};

const BUILTIN_LOCATION: &str = "builtin";

/// Registry of statically linked part kinds.
///
/// Each kind maps to a constructor. An enabled module name resolves to the
/// kind registered under an alias for it, or to the kind with the same name.
///
/// Built-in kinds:
/// - "stdin_lines" -> StdinLines (source, one message per stdin line)
/// - "console" -> Console (sink, one stdout line per message)
/// - "change_text_case" -> ChangeTextCase (option `mode`: upper|lower|proper|title)
/// - "command_dispatch" -> CommandDispatch (option `commands`: keywords -> shell line)
#[derive(Clone, Default)]
pub struct BuiltinRegistry {
    constructors: BTreeMap<String, PartConstructor>,
    aliases: HashMap<String, String>,
    options: HashMap<String, PartOptions>,
}

impl BuiltinRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin_parts() -> Self {
        Self::new()
            .register("stdin_lines", |_| Ok(Box::new(StdinLines::stdin())))
            .register("console", |options| Ok(Box::new(Console::from_options(options)?)))
            .register("change_text_case", |options| {
                Ok(Box::new(ChangeTextCase::from_options(options)?))
            })
            .register("command_dispatch", |options| {
                Ok(Box::new(CommandDispatch::from_options(options)?))
            })
    }

    /// Register a constructor for `kind`, replacing any previous one.
    pub fn register<F>(mut self, kind: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&PartOptions) -> Result<Box<dyn Part>, PartError> + Send + Sync + 'static,
    {
        self.constructors.insert(kind.into(), Arc::new(constructor));
        self
    }

    /// Load module `name` as an instance of `kind`.
    pub fn alias(mut self, name: impl Into<String>, kind: impl Into<String>) -> Self {
        self.aliases.insert(name.into(), kind.into());
        self
    }

    /// Options passed to the constructor when module `name` is materialized.
    pub fn configure(mut self, name: impl Into<String>, options: PartOptions) -> Self {
        self.options.insert(name.into(), options);
        self
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    pub fn is_available(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    /// Kind that module `name` resolves to.
    pub fn kind_for<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Build one part of `kind` under `name`. `location` only feeds error
    /// messages.
    pub fn materialize(
        &self,
        name: &str,
        kind: &str,
        options: &PartOptions,
        location: &str,
    ) -> Result<Box<dyn Part>, RegistryError> {
        let constructor = self
            .constructors
            .get(kind)
            .ok_or_else(|| RegistryError::InvalidPlugin {
                name: name.to_string(),
                location: location.to_string(),
                reason: format!("unknown part kind '{kind}'"),
            })?;

        constructor(options).map_err(|e| RegistryError::InvalidPlugin {
            name: name.to_string(),
            location: location.to_string(),
            reason: e.to_string(),
        })
    }
}

impl PluginRegistry for BuiltinRegistry {
    fn discover(&self, _search_paths: &[PathBuf], enabled: &[String]) -> PartMap {
        let empty = PartOptions::new();
        let mut seen = HashSet::new();
        let mut parts = PartMap::new();

        for name in enabled {
            if !seen.insert(name.as_str()) {
                continue;
            }
            let kind = self.kind_for(name);
            let options = self.options.get(name).unwrap_or(&empty);

            match self.materialize(name, kind, options, BUILTIN_LOCATION) {
                Ok(part) => {
                    PartMaterialized {
                        name,
                        kind: part.kind(),
                        location: BUILTIN_LOCATION,
                    }
                    .log();
                    parts.insert(name.clone(), part);
                }
                Err(error) => PluginSkipped { error: &error }.log(),
            }
        }
        parts
    }
}

impl std::fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinRegistry")
            .field("kinds", &self.kinds())
            .field("aliases", &self.aliases)
            .finish()
    }
}
