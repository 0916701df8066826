// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::PartMap;
use crate::errors::PartError;
use crate::traits::Part;

/// Free-form options handed to a part constructor.
pub type PartOptions = HashMap<String, serde_yaml::Value>;

/// Builds a fresh part instance from its options.
pub type PartConstructor =
    Arc<dyn Fn(&PartOptions) -> Result<Box<dyn Part>, PartError> + Send + Sync>;

/// Resolves enabled part names to part instances.
///
/// Discovery is fail-soft per part: a name that cannot be materialized is
/// logged and left out of the returned map, and never stops discovery of the
/// other names.
pub trait PluginRegistry: Send + Sync {
    fn discover(&self, search_paths: &[PathBuf], enabled: &[String]) -> PartMap;
}
