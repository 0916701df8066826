// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Error returned by a part from `init` or from an item of its produce sequence.
#[derive(Debug, Error)]
pub enum PartError {
    #[error("{0}")]
    Failed(String),

    #[error("Invalid part options: {0}")]
    InvalidOptions(String),

    #[error("Command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("Unknown mind '{0}'")]
    UnknownMind(String),

    #[error("No previous mind to switch back to")]
    NoPreviousMind,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PartError {
    pub fn failed(message: impl Into<String>) -> Self {
        PartError::Failed(message.into())
    }
}

/// Failure of a single produce/forward cycle. Always recovered inside the
/// part's own execution context: it is logged and the loop moves on.
#[derive(Debug, Error)]
pub enum ProduceCycleError {
    #[error("Part '{part}' failed while producing: {source}")]
    Produce {
        part: String,
        #[source]
        source: PartError,
    },

    #[error("Part '{part}' could not forward to '{listener}': inbox is closed")]
    Forward { part: String, listener: String },

    #[error("Part '{part}' panicked: {message}")]
    Panicked { part: String, message: String },
}
