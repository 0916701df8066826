// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io::{self, Write};

use serde::Deserialize;

use crate::backends::local::parse_options;
use crate::errors::PartError;
use crate::traits::{fail, nothing, Part, PartContext, PartOptions, Produced};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsoleOptions {
    /// Text written before every line.
    #[serde(default)]
    pub prefix: Option<String>,
}

/// Sink part: writes every inbound message as one line.
pub struct Console {
    prefix: String,
    out: Box<dyn Write + Send>,
}

impl Console {
    pub fn new(prefix: impl Into<String>, out: Box<dyn Write + Send>) -> Self {
        Self {
            prefix: prefix.into(),
            out,
        }
    }

    pub fn stdout() -> Self {
        Self::new("", Box::new(io::stdout()))
    }

    pub fn from_options(options: &PartOptions) -> Result<Self, PartError> {
        let options: ConsoleOptions = parse_options(options)?;
        Ok(Self::new(options.prefix.unwrap_or_default(), Box::new(io::stdout())))
    }
}

impl Part for Console {
    fn produce(&mut self, ctx: &mut PartContext<'_>) -> Produced {
        let Some(message) = ctx.recv() else {
            return nothing();
        };

        let line = match message.as_text() {
            Some(text) => text.to_string(),
            None => format!("{message:?}"),
        };
        tracing::debug!(part = ctx.name(), line = %line, "console output");

        match writeln!(self.out, "{}{}", self.prefix, line).and_then(|_| self.out.flush()) {
            Ok(()) => nothing(),
            Err(e) => fail(e.into()),
        }
    }

    fn kind(&self) -> &'static str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::HubSignals;
    use crate::wire::{mailbox, Message};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_one_line_per_message() {
        let buffer = SharedBuffer::default();
        let mut console = Console::new("> ", Box::new(buffer.clone()));

        let signals = HubSignals::new();
        let (outlet, mut inbox) = mailbox("screen");
        outlet.deliver(Message::text("one")).unwrap();
        outlet.deliver(Message::text("two")).unwrap();

        let mut ctx = PartContext::new("screen", &signals, Some(&mut inbox));
        assert_eq!(console.produce(&mut ctx).count(), 0);
        assert_eq!(console.produce(&mut ctx).count(), 0);

        let written = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "> one\n> two\n");
    }

    #[test]
    fn test_prefix_option() {
        let mut options = PartOptions::new();
        options.insert("prefix".to_string(), serde_yaml::Value::from("[screen] "));
        let console = Console::from_options(&options).unwrap();
        assert_eq!(console.prefix, "[screen] ");
        assert_eq!(console.kind(), "console");
    }
}
