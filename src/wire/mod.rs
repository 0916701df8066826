// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-process message transport between parts.
//!
//! * `message` - the opaque, cheaply cloned payload handle
//! * `mailbox` - the per-part inbound queue (`Inbox`) and its producer side (`Outlet`)

mod mailbox;
mod message;

pub use mailbox::{mailbox, Inbox, Outlet};
pub use message::Message;
