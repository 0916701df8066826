// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All diagnostic and operational log lines in partwire are built from message
//! types under `messages`. Each type implements `Display` for the human-readable
//! text and `StructuredLog` to emit the same event with structured fields at the
//! right level.
//!
//! # Usage
//!
//! ```rust
//! use partwire::observability::messages::{hub::HubStarting, StructuredLog};
//!
//! HubStarting {
//!     module_count: 3,
//!     link_count: 2,
//! }
//! .log();
//! ```

pub mod messages;
