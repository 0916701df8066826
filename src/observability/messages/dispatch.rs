// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for keyword command dispatch.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Input text matched a command keyword.
///
/// # Log Level
/// `info!`
pub struct CommandDispatched<'a> {
    pub keyword: &'a str,
    pub command: &'a str,
}

impl Display for CommandDispatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Dispatching '{}' as {}", self.keyword, self.command)
    }
}

impl StructuredLog for CommandDispatched<'_> {
    fn log(&self) {
        tracing::info!(keyword = self.keyword, command = self.command, "{}", self);
    }
}

/// Input text did not match any keyword; it is forwarded untouched.
///
/// # Log Level
/// `debug!`
pub struct CommandUnmatched<'a> {
    pub input: &'a str,
}

impl Display for CommandUnmatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Input: {}", self.input)
    }
}

impl StructuredLog for CommandUnmatched<'_> {
    fn log(&self) {
        tracing::debug!(input = self.input, "{}", self);
    }
}

/// The dispatcher's active mind changed.
///
/// # Log Level
/// `info!`
pub struct MindSwitched<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub depth: usize,
}

impl Display for MindSwitched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Opening mind '{}' (was '{}')", self.to, self.from)
    }
}

impl StructuredLog for MindSwitched<'_> {
    fn log(&self) {
        tracing::info!(from = self.from, to = self.to, depth = self.depth, "{}", self);
    }
}
