// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors that abort `Hub::start`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubError {
    /// A link names a part that is not in the loaded set. Raised during the
    /// link phase, before any execution context exists.
    #[error("Link '{producer}' -> '{consumer}' references unknown part '{missing}'")]
    UnknownPartReference {
        producer: String,
        consumer: String,
        missing: String,
    },

    #[error("Hub has already been started; construct a new Hub for a new run")]
    AlreadyStarted,

    #[error("Failed to spawn execution context for part '{part}': {source}")]
    SpawnFailed {
        part: String,
        #[source]
        source: std::io::Error,
    },
}
