// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::HubSignals;
use crate::errors::PartError;
use crate::wire::{Inbox, Message};

/// One produce cycle's worth of output.
///
/// A lazy, finite, non-restartable sequence. Items are forwarded as they are
/// pulled; an `Err` item ends the cycle, and anything yielded before it has
/// already been delivered.
pub type Produced = Box<dyn Iterator<Item = Result<Message, PartError>>>;

/// A pluggable unit of work.
///
/// The hub runs every part on its own thread: `init` once before the startup
/// barrier, then `produce` repeatedly until shutdown. Messages yielded by
/// `produce` are fanned out to the part's listeners by the hub; the part never
/// sees who its listeners are.
///
/// Consumer-style parts block on `ctx.recv()`. Source-style parts have no
/// inbox and may block on their own external input instead.
pub trait Part: Send {
    fn init(&mut self) -> Result<(), PartError> {
        Ok(())
    }

    fn produce(&mut self, ctx: &mut PartContext<'_>) -> Produced;

    /// Implementation name, independent of the name the part was loaded under.
    fn kind(&self) -> &'static str;
}

/// Everything a part may touch while producing: hub signal queries and its
/// own inbound queue. Other parts and their queues are not reachable.
pub struct PartContext<'a> {
    name: &'a str,
    hub: &'a HubSignals,
    inbox: Option<&'a mut Inbox>,
}

impl<'a> PartContext<'a> {
    pub fn new(name: &'a str, hub: &'a HubSignals, inbox: Option<&'a mut Inbox>) -> Self {
        Self { name, hub, inbox }
    }

    /// Name the part was loaded under.
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn hub(&self) -> &HubSignals {
        self.hub
    }

    /// Whether any link feeds this part.
    pub fn has_inbox(&self) -> bool {
        self.inbox.is_some()
    }

    /// Block until the next inbound message. `None` if the part has no inbox or
    /// the hub closed it for shutdown.
    pub fn recv(&mut self) -> Option<Message> {
        self.inbox.as_deref_mut().and_then(Inbox::recv)
    }

    pub fn try_recv(&mut self) -> Option<Message> {
        self.inbox.as_deref_mut().and_then(Inbox::try_recv)
    }
}

/// Yield the given messages, in order.
pub fn emit<I>(messages: I) -> Produced
where
    I: IntoIterator<Item = Message>,
    I::IntoIter: 'static,
{
    Box::new(messages.into_iter().map(Ok))
}

/// Yield nothing this cycle.
pub fn nothing() -> Produced {
    Box::new(std::iter::empty())
}

/// End this cycle with an error.
pub fn fail(error: PartError) -> Produced {
    Box::new(std::iter::once(Err(error)))
}
