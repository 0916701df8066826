// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Part discovery from directories on the module path.
//!
//! ```text
//! parts/
//! ├── keyboard/
//! │   └── part.yaml      kind: stdin_lines
//! └── shout/
//!     └── part.yaml      kind: change_text_case
//!                        options: { mode: upper }
//! ```
//!
//! Only entries whose name is enabled are looked at. An enabled entry must be a
//! directory holding a `part.yaml` manifest; the manifest's `kind` names a
//! constructor in the wrapped [`BuiltinRegistry`] (it defaults to the directory
//! name) and its `options` go to that constructor. When several search paths
//! hold the same name, candidates are tried in path order and the first one
//! that loads wins; a broken entry does not hide a later valid one.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::backends::local::BuiltinRegistry;
use crate::config::consts::MANIFEST_FILE;
use crate::config::PartMap;
use crate::errors::RegistryError;
use crate::observability::messages::{registry::*, StructuredLog};
use crate::traits::{Part, PartOptions, PluginRegistry};

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    kind: Option<String>,
    #[serde(default)]
    options: PartOptions,
}

#[derive(Debug, Clone)]
pub struct DirectoryRegistry {
    builtins: BuiltinRegistry,
}

impl DirectoryRegistry {
    pub fn new(builtins: BuiltinRegistry) -> Self {
        Self { builtins }
    }

    /// Map each enabled name to every directory entry carrying it, in search path order.
    fn scan(&self, search_paths: &[PathBuf], enabled: &HashSet<&str>) -> BTreeMap<String, Vec<PathBuf>> {
        let mut found: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

        for search_path in search_paths {
            SearchPathScanning { path: search_path }.log();

            let entries = match fs::read_dir(search_path) {
                Ok(entries) => entries,
                Err(source) => {
                    SearchPathSkipped {
                        error: &RegistryError::SearchPathUnreadable {
                            path: search_path.clone(),
                            source,
                        },
                    }
                    .log();
                    continue;
                }
            };

            let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
            paths.sort();

            for path in paths {
                let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                if !enabled.contains(name) {
                    continue;
                }
                found.entry(name.to_string()).or_default().push(path);
            }
        }
        found
    }

    fn load(&self, name: &str, dir: &Path) -> Result<(Box<dyn Part>, String), RegistryError> {
        let location = dir.display().to_string();
        let invalid = |reason: String| RegistryError::InvalidPlugin {
            name: name.to_string(),
            location: location.clone(),
            reason,
        };

        if !dir.is_dir() {
            return Err(invalid("not a directory".to_string()));
        }
        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(invalid(format!("missing {MANIFEST_FILE}")));
        }

        let content = fs::read_to_string(&manifest_path)
            .map_err(|e| invalid(format!("cannot read {MANIFEST_FILE}: {e}")))?;
        let manifest: Manifest = if content.trim().is_empty() {
            Manifest::default()
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| invalid(format!("malformed {MANIFEST_FILE}: {e}")))?
        };

        let kind = manifest.kind.unwrap_or_else(|| name.to_string());
        let part = self
            .builtins
            .materialize(name, &kind, &manifest.options, &location)?;
        Ok((part, location))
    }
}

impl PluginRegistry for DirectoryRegistry {
    fn discover(&self, search_paths: &[PathBuf], enabled: &[String]) -> PartMap {
        let enabled_set: HashSet<&str> = enabled.iter().map(String::as_str).collect();
        let found = self.scan(search_paths, &enabled_set);

        let mut seen = HashSet::new();
        let mut parts = PartMap::new();
        for name in enabled {
            if !seen.insert(name.as_str()) {
                continue;
            }
            let Some(candidates) = found.get(name) else {
                EnabledModuleNotFound { name }.log();
                continue;
            };

            for (index, dir) in candidates.iter().enumerate() {
                match self.load(name, dir) {
                    Ok((part, location)) => {
                        PartMaterialized {
                            name,
                            kind: part.kind(),
                            location: &location,
                        }
                        .log();
                        parts.insert(name.clone(), part);
                        for path in &candidates[index + 1..] {
                            ModuleShadowed { name, path }.log();
                        }
                        break;
                    }
                    Err(error) => PluginSkipped { error: &error }.log(),
                }
            }
        }
        parts
    }
}
