// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Plugin registries and the parts they can build.
//!
//! # Available Backends
//!
//! ## Local Backend
//! Statically linked part kinds behind [`BuiltinRegistry`], a name -> constructor
//! table:
//! - **stdin_lines**: source, one message per line of standard input
//! - **console**: sink, writes each message as a line on standard output
//! - **change_text_case**: transform, re-cases text (`mode: upper|lower|proper|title`)
//! - **command_dispatch**: runs keyword commands, passes the text on
//!
//! ## Directory Backend
//! [`DirectoryRegistry`] scans the configured `module_path` for directories
//! named after enabled modules, each carrying a `part.yaml` manifest that picks
//! a built-in kind and its options.
//!
//! ## Stub Backend (Test-Only)
//! Scripted parts for hub tests; NOT available in production builds.
//!
//! # Architecture
//!
//! ```text
//! module_path + modules → PluginRegistry::discover → PartMap → Hub
//! ```
//!
//! Discovery is fail-soft: a module that cannot be built is logged and left
//! out, and the hub decides at link time whether its absence is fatal.
//!
//! # Examples
//!
//! ```rust
//! use partwire::backends::{BuiltinRegistry, DirectoryRegistry};
//! use partwire::traits::PluginRegistry;
//!
//! let builtins = BuiltinRegistry::with_builtin_parts().alias("shout", "change_text_case");
//! let parts = builtins.discover(&[], &["shout".to_string()]);
//! assert_eq!(parts.len(), 1);
//!
//! let from_disk = DirectoryRegistry::new(builtins);
//! assert!(from_disk.discover(&[], &["shout".to_string()]).is_empty());
//! ```

pub mod directory;
pub mod local;
#[cfg(test)]
pub mod stub;

pub use directory::DirectoryRegistry;
pub use local::BuiltinRegistry;
