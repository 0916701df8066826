// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::iter;

use serde::Deserialize;

use crate::backends::local::command::{execute, Command, CommandTable, DispatchContext, DEFAULT_MIND};
use crate::backends::local::parse_options;
use crate::errors::PartError;
use crate::observability::messages::{dispatch::*, StructuredLog};
use crate::traits::{emit, nothing, Part, PartContext, PartOptions, Produced};

/// A command as written in part options: either a shell line or a change of
/// mind.
///
/// ```yaml
/// "HELLO, HI": "echo hello there"
/// "ROOT MIND": { switch_to: root }
/// "BOOT MIND": { jump_to: boot }
/// "GO BACK": switch_back
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CommandSpec {
    Mind(MindAction),
    Shell(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MindAction {
    /// Activate a mind and remember the one being left.
    SwitchTo(String),
    /// Activate a mind without touching the history.
    JumpTo(String),
    SwitchBack,
}

impl CommandSpec {
    fn target(&self) -> Option<&str> {
        match self {
            CommandSpec::Mind(MindAction::SwitchTo(name) | MindAction::JumpTo(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    fn into_command(self) -> Command {
        match self {
            CommandSpec::Shell(line) => Command::ShellLine(line),
            CommandSpec::Mind(MindAction::SwitchTo(name)) => {
                Command::invoke(move |ctx| ctx.set_mind(&name, true))
            }
            CommandSpec::Mind(MindAction::JumpTo(name)) => {
                Command::invoke(move |ctx| ctx.set_mind(&name, false))
            }
            CommandSpec::Mind(MindAction::SwitchBack) => Command::invoke(|ctx| ctx.switch_back()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandDispatchOptions {
    /// Comma-separated keywords -> command, for the default mind.
    #[serde(default)]
    pub commands: BTreeMap<String, CommandSpec>,
    /// Mind name -> its keyword table.
    #[serde(default)]
    pub minds: BTreeMap<String, BTreeMap<String, CommandSpec>>,
    /// Mind active at start; defaults to `boot`.
    #[serde(default)]
    pub initial_mind: Option<String>,
}

impl CommandDispatchOptions {
    fn into_context(mut self) -> Result<DispatchContext, PartError> {
        if !self.commands.is_empty() || self.minds.is_empty() {
            let commands = std::mem::take(&mut self.commands);
            self.minds.entry(DEFAULT_MIND.to_string()).or_default().extend(commands);
        }

        for (mind, specs) in &self.minds {
            for (keys, spec) in specs {
                if let Some(target) = spec.target().filter(|t| !self.minds.contains_key(*t)) {
                    return Err(PartError::InvalidOptions(format!(
                        "command '{keys}' in mind '{mind}' switches to unknown mind '{target}'"
                    )));
                }
            }
        }

        let tables = self
            .minds
            .into_iter()
            .map(|(mind, specs)| {
                let table = specs
                    .into_iter()
                    .map(|(keys, spec)| (keys, spec.into_command()))
                    .collect();
                (mind, table)
            })
            .collect();
        let initial = self.initial_mind.as_deref().unwrap_or(DEFAULT_MIND);
        DispatchContext::with_minds(tables, initial)
    }
}

/// Consumer part: runs the command whose keyword matches an inbound text
/// message in the active mind, then passes the text on unchanged.
///
/// Blank input is dropped. Input that matches no keyword is still passed on.
/// A command that fails ends the cycle with an error after the input has been
/// forwarded.
pub struct CommandDispatch {
    context: DispatchContext,
}

impl CommandDispatch {
    pub fn new(table: CommandTable) -> Self {
        Self::with_context(DispatchContext::new(table))
    }

    pub fn with_context(context: DispatchContext) -> Self {
        Self { context }
    }

    pub fn from_options(options: &PartOptions) -> Result<Self, PartError> {
        let options: CommandDispatchOptions = parse_options(options)?;
        Ok(Self::with_context(options.into_context()?))
    }

    /// Table of the active mind.
    pub fn table(&self) -> &CommandTable {
        self.context.table()
    }

    pub fn context(&self) -> &DispatchContext {
        &self.context
    }
}

impl Part for CommandDispatch {
    fn produce(&mut self, ctx: &mut PartContext<'_>) -> Produced {
        let Some(message) = ctx.recv() else {
            return nothing();
        };
        let Some(text) = message.as_text() else {
            return emit([message]);
        };
        if text.trim().is_empty() {
            return nothing();
        }

        let Some((keyword, command)) = self.context.lookup(text) else {
            CommandUnmatched { input: text }.log();
            return emit([message]);
        };

        CommandDispatched {
            keyword: &keyword,
            command: &command.to_string(),
        }
        .log();
        match execute(&command, &keyword, &mut self.context) {
            Ok(()) => emit([message]),
            Err(e) => Box::new(iter::once(Ok(message)).chain(iter::once(Err(e)))),
        }
    }

    fn kind(&self) -> &'static str {
        "command_dispatch"
    }
}
