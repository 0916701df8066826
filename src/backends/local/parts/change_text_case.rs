// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

use crate::backends::local::parse_options;
use crate::errors::PartError;
use crate::traits::{emit, fail, nothing, Part, PartContext, PartOptions, Produced};
use crate::wire::Message;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    #[default]
    Upper,
    Lower,
    Proper,
    Title,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeTextCaseOptions {
    #[serde(default)]
    pub mode: CaseMode,
}

/// Change Text Case part - re-cases every text message it receives
pub struct ChangeTextCase {
    mode: CaseMode,
}

impl ChangeTextCase {
    pub fn new(mode: CaseMode) -> Self {
        Self { mode }
    }

    pub fn from_options(options: &PartOptions) -> Result<Self, PartError> {
        let options: ChangeTextCaseOptions = parse_options(options)?;
        Ok(Self::new(options.mode))
    }

    pub fn mode(&self) -> CaseMode {
        self.mode
    }

    pub fn apply(&self, input: &str) -> String {
        match self.mode {
            CaseMode::Upper => input.to_uppercase(),
            CaseMode::Lower => input.to_lowercase(),
            CaseMode::Proper => input
                .split_whitespace()
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" "),
            CaseMode::Title => input
                .split_whitespace()
                .enumerate()
                .map(|(i, word)| {
                    let lower = word.to_lowercase();
                    if i > 0 && is_minor_word(&lower) {
                        lower
                    } else {
                        capitalize(word)
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

fn is_minor_word(word: &str) -> bool {
    matches!(
        word,
        "a" | "an" | "the" | "and" | "or" | "but" | "in" | "on" | "at" | "to" | "for" | "of" | "with" | "by"
    )
}

impl Part for ChangeTextCase {
    fn produce(&mut self, ctx: &mut PartContext<'_>) -> Produced {
        let Some(message) = ctx.recv() else {
            return nothing();
        };
        match message.as_text() {
            Some(text) => emit([Message::text(self.apply(text))]),
            None => fail(PartError::failed(format!(
                "'{}' can only re-case text, got {:?}",
                ctx.name(),
                message
            ))),
        }
    }

    fn kind(&self) -> &'static str {
        "change_text_case"
    }
}
