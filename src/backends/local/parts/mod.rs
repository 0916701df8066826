// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod change_text_case;
pub mod command_dispatch;
pub mod console;
pub mod stdin_lines;

pub use change_text_case::*;
pub use command_dispatch::*;
pub use console::*;
pub use stdin_lines::*;
