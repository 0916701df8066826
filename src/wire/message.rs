// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An opaque payload forwarded from a producing part to its listeners.
///
/// The hub never looks inside a message. Cloning a `Message` copies the handle,
/// not the payload: every listener of a fan-out receives the same underlying
/// value, so payloads are shared and immutable from the listener's side.
///
/// # Example
/// ```
/// use partwire::wire::Message;
///
/// let msg = Message::text("hello");
/// let copy = msg.clone();
///
/// assert_eq!(copy.as_text(), Some("hello"));
/// assert!(msg.same_payload(&copy));
/// ```
#[derive(Clone)]
pub struct Message {
    payload: Arc<dyn Any + Send + Sync>,
}

impl Message {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            payload: Arc::new(value),
        }
    }

    /// Text is the payload most built-in parts exchange.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text.into())
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.payload).downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        (*self.payload).is::<T>()
    }

    /// Borrow the payload as text if it is a `String` or a `&'static str`.
    pub fn as_text(&self) -> Option<&str> {
        self.downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| self.downcast_ref::<&'static str>().copied())
    }

    /// True when both handles point at the same payload allocation.
    pub fn same_payload(&self, other: &Message) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.debug_tuple("Message").field(&text).finish(),
            None => f.write_str("Message(<opaque>)"),
        }
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::text(text)
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::text(text)
    }
}
