// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::wire::Message;

/// What travels through an inbound queue.
#[derive(Debug)]
pub(crate) enum Envelope {
    Deliver(Message),
    /// Shutdown sentinel: wakes a consumer blocked on an empty queue.
    Close,
}

/// Create the inbound queue for the part called `owner`.
///
/// The queue is FIFO and unbounded. The `Outlet` half can be cloned freely so
/// that any number of producers may enqueue concurrently; the `Inbox` half is
/// owned by exactly one consumer.
///
/// # Example
/// ```
/// use partwire::wire::{mailbox, Message};
///
/// let (outlet, mut inbox) = mailbox("screen");
/// outlet.deliver(Message::text("x")).unwrap();
/// outlet.deliver(Message::text("y")).unwrap();
///
/// assert_eq!(inbox.recv().unwrap().as_text(), Some("x"));
/// assert_eq!(inbox.try_recv().unwrap().as_text(), Some("y"));
/// assert!(inbox.try_recv().is_none());
/// ```
pub fn mailbox(owner: &str) -> (Outlet, Inbox) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (
        Outlet {
            listener: owner.to_string(),
            sender,
        },
        Inbox {
            owner: owner.to_string(),
            receiver,
            closed: false,
        },
    )
}

/// Producer side of a part's inbound queue.
#[derive(Debug, Clone)]
pub struct Outlet {
    listener: String,
    sender: UnboundedSender<Envelope>,
}

impl Outlet {
    /// Name of the part that owns the queue this outlet feeds.
    pub fn listener(&self) -> &str {
        &self.listener
    }

    /// Enqueue a message. Hands the message back if the consumer is gone.
    pub fn deliver(&self, message: Message) -> Result<(), Message> {
        self.sender
            .send(Envelope::Deliver(message))
            .map_err(|rejected| match rejected.0 {
                Envelope::Deliver(message) => message,
                Envelope::Close => unreachable!("deliver only sends Deliver envelopes"),
            })
    }

    /// Enqueue the shutdown sentinel. Returns false if the consumer is gone.
    pub(crate) fn close(&self) -> bool {
        self.sender.send(Envelope::Close).is_ok()
    }
}

/// Consumer side of a part's inbound queue.
#[derive(Debug)]
pub struct Inbox {
    owner: String,
    receiver: UnboundedReceiver<Envelope>,
    closed: bool,
}

impl Inbox {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Block the calling thread until a message arrives.
    ///
    /// Returns `None` once the hub has closed the queue for shutdown, and on
    /// every call after that. Must not be called from inside an async runtime.
    pub fn recv(&mut self) -> Option<Message> {
        if self.closed {
            return None;
        }
        match self.receiver.blocking_recv() {
            Some(Envelope::Deliver(message)) => Some(message),
            Some(Envelope::Close) | None => {
                self.closed = true;
                None
            }
        }
    }

    /// Take the next message if one is already queued.
    pub fn try_recv(&mut self) -> Option<Message> {
        if self.closed {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(Envelope::Deliver(message)) => Some(message),
            Err(TryRecvError::Empty) => None,
            Ok(Envelope::Close) | Err(TryRecvError::Disconnected) => {
                self.closed = true;
                None
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
