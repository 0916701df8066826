// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while materializing parts. None of these are fatal to the
/// hub: the registry logs them and skips the offending name.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A discovered module does not meet the structural requirements of a part
    #[error("Invalid plugin '{name}' ({location}): {reason}")]
    InvalidPlugin {
        name: String,
        location: String,
        reason: String,
    },

    #[error("Failed to scan module path '{}': {source}", path.display())]
    SearchPathUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
