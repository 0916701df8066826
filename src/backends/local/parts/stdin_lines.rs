// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io::{self, BufRead, BufReader};

use crate::traits::{emit, fail, nothing, Part, PartContext, Produced};
use crate::wire::Message;

/// Source part: one message per line read from a reader, stdin by default.
///
/// Reading blocks the part's own thread. Once the reader is exhausted the part
/// yields nothing on every later cycle.
pub struct StdinLines {
    reader: Box<dyn BufRead + Send>,
    exhausted: bool,
}

impl StdinLines {
    pub fn new(reader: Box<dyn BufRead + Send>) -> Self {
        Self {
            reader,
            exhausted: false,
        }
    }

    pub fn stdin() -> Self {
        Self::new(Box::new(BufReader::new(io::stdin())))
    }
}

impl Part for StdinLines {
    fn produce(&mut self, _ctx: &mut PartContext<'_>) -> Produced {
        if self.exhausted {
            return nothing();
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {
                tracing::debug!("input exhausted");
                self.exhausted = true;
                nothing()
            }
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\r', '\n']).to_string();
                emit([Message::text(trimmed)])
            }
            Err(e) => fail(e.into()),
        }
    }

    fn kind(&self) -> &'static str {
        "stdin_lines"
    }
}
