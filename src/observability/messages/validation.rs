// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration validation warnings and errors.
//!
//! This module contains message types for logging events related to:
//! * Duplicate module names
//! * Links naming modules that are not enabled
//! * Links that are legal but probably unintended (duplicates, self links)

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Duplicate module name in `modules`.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct DuplicateModuleDetected<'a> {
    pub module: &'a str,
}

impl Display for DuplicateModuleDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Duplicate module name: '{}'", self.module)
    }
}

impl StructuredLog for DuplicateModuleDetected<'_> {
    fn log(&self) {
        tracing::error!(module = self.module, "{}", self);
    }
}

/// `module_map` entry references a module missing from `modules`.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct UnlistedLinkEndpoint<'a> {
    pub producer: &'a str,
    pub consumer: &'a str,
    pub missing: &'a str,
}

impl Display for UnlistedLinkEndpoint<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Link '{}' -> '{}' references '{}' which is not listed in modules",
            self.producer, self.consumer, self.missing
        )
    }
}

impl StructuredLog for UnlistedLinkEndpoint<'_> {
    fn log(&self) {
        tracing::error!(
            producer = self.producer,
            consumer = self.consumer,
            missing = self.missing,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "unlisted_link_endpoint",
            span_name = name,
            producer = self.producer,
            consumer = self.consumer,
        )
    }
}

/// The same link is declared more than once.
///
/// # Log Level
/// `warn!` - Legal, but the consumer receives every message once per declaration
pub struct DuplicateLinkWarning<'a> {
    pub producer: &'a str,
    pub consumer: &'a str,
    pub occurrences: usize,
}

impl Display for DuplicateLinkWarning<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Link '{}' -> '{}' is declared {} times; '{}' will receive each message {} times",
            self.producer, self.consumer, self.occurrences, self.consumer, self.occurrences
        )
    }
}

impl StructuredLog for DuplicateLinkWarning<'_> {
    fn log(&self) {
        tracing::warn!(
            producer = self.producer,
            consumer = self.consumer,
            occurrences = self.occurrences,
            "{}", self
        );
    }
}

/// A part is linked to itself.
///
/// # Log Level
/// `warn!` - Legal feedback loop
pub struct SelfLinkWarning<'a> {
    pub module: &'a str,
}

impl Display for SelfLinkWarning<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Module '{}' is linked to itself; its output feeds back into its own inbox",
            self.module
        )
    }
}

impl StructuredLog for SelfLinkWarning<'_> {
    fn log(&self) {
        tracing::warn!(module = self.module, "{}", self);
    }
}
