// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Keyword commands for the `command_dispatch` part.
//!
//! A [`CommandTable`] maps upper-cased keywords to a [`Command`]. A command is
//! either an in-process handle or a line of shell text, and the two are told
//! apart by `match`, never by inspecting the value at runtime. Whatever state
//! commands need lives in a [`DispatchContext`] that is passed in explicitly.
//!
//! A dispatcher can hold several named minds, each with its own table. Only the
//! active mind's table is consulted. Commands switch minds through the context,
//! and every remembered switch can be undone with
//! [`DispatchContext::switch_back`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::process;
use std::sync::Arc;

use crate::errors::PartError;
use crate::observability::messages::{dispatch::MindSwitched, StructuredLog};

/// Mind that a single-table dispatcher runs under.
pub const DEFAULT_MIND: &str = "boot";

/// In-process command body.
pub type InvokeHandle = Arc<dyn Fn(&mut DispatchContext) -> Result<(), PartError> + Send + Sync>;

#[derive(Clone)]
pub enum Command {
    Invoke(InvokeHandle),
    ShellLine(String),
}

impl Command {
    pub fn invoke<F>(handle: F) -> Self
    where
        F: Fn(&mut DispatchContext) -> Result<(), PartError> + Send + Sync + 'static,
    {
        Command::Invoke(Arc::new(handle))
    }

    pub fn shell(line: impl Into<String>) -> Self {
        Command::ShellLine(line.into())
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Invoke(_) => f.write_str("Invoke(<handle>)"),
            Command::ShellLine(line) => f.debug_tuple("ShellLine").field(line).finish(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Invoke(_) => f.write_str("<invoke>"),
            Command::ShellLine(line) => f.write_str(line),
        }
    }
}

/// State shared by every command of one dispatcher: the named minds, the
/// active one, the stack of minds to return to, and the last command that ran.
#[derive(Debug, Clone)]
pub struct DispatchContext {
    minds: BTreeMap<String, CommandTable>,
    current: String,
    history: Vec<String>,
    last_command: Option<String>,
}

impl Default for DispatchContext {
    fn default() -> Self {
        Self::new(CommandTable::new())
    }
}

impl DispatchContext {
    /// A context with `table` as its only mind, [`DEFAULT_MIND`].
    pub fn new(table: CommandTable) -> Self {
        Self {
            minds: BTreeMap::from([(DEFAULT_MIND.to_string(), table)]),
            current: DEFAULT_MIND.to_string(),
            history: Vec::new(),
            last_command: None,
        }
    }

    pub fn with_minds(minds: BTreeMap<String, CommandTable>, initial: &str) -> Result<Self, PartError> {
        if !minds.contains_key(initial) {
            return Err(PartError::UnknownMind(initial.to_string()));
        }
        Ok(Self {
            minds,
            current: initial.to_string(),
            history: Vec::new(),
            last_command: None,
        })
    }

    pub fn current_mind(&self) -> &str {
        &self.current
    }

    pub fn mind_names(&self) -> Vec<&str> {
        self.minds.keys().map(String::as_str).collect()
    }

    pub fn has_mind(&self, name: &str) -> bool {
        self.minds.contains_key(name)
    }

    /// The active mind's table.
    pub fn table(&self) -> &CommandTable {
        // `current` is only ever set to a key of `minds`.
        &self.minds[&self.current]
    }

    /// Minds that `switch_back` will return to, most recent last.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Keyword of the most recent command that ran successfully.
    pub fn last_command(&self) -> Option<&str> {
        self.last_command.as_deref()
    }

    /// Activate mind `name`. With `remember`, the mind being left is pushed so
    /// that [`switch_back`](Self::switch_back) can return to it.
    pub fn set_mind(&mut self, name: &str, remember: bool) -> Result<(), PartError> {
        if !self.minds.contains_key(name) {
            return Err(PartError::UnknownMind(name.to_string()));
        }
        let previous = std::mem::replace(&mut self.current, name.to_string());
        MindSwitched {
            from: &previous,
            to: name,
            depth: self.history.len() + usize::from(remember),
        }
        .log();
        if remember {
            self.history.push(previous);
        }
        Ok(())
    }

    /// Return to the mind that was active before the last remembered switch.
    pub fn switch_back(&mut self) -> Result<(), PartError> {
        let previous = self.history.pop().ok_or(PartError::NoPreviousMind)?;
        self.set_mind(&previous, false)
    }

    /// Look `input` up in the active mind.
    pub fn lookup(&self, input: &str) -> Option<(String, Command)> {
        self.table()
            .lookup(input)
            .map(|(keyword, command)| (keyword, command.clone()))
    }

    fn record(&mut self, keyword: &str) {
        self.last_command = Some(keyword.to_string());
    }
}

/// Keyword -> command lookup.
///
/// # Example
/// ```
/// use partwire::backends::local::{Command, CommandTable};
///
/// let mut table = CommandTable::new();
/// table.insert("hello, hi", Command::shell("echo hello"));
///
/// assert!(table.lookup("HI").is_some());
/// assert!(table.lookup(" Hello ").is_some());
/// assert!(table.lookup("bye").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    entries: HashMap<String, Command>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `command` under every comma-separated synonym in `keys`.
    pub fn insert(&mut self, keys: &str, command: Command) {
        for synonym in keys.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            self.entries.insert(synonym.to_uppercase(), command.clone());
        }
    }

    /// Find the command for `input`, matched case-insensitively on the whole
    /// trimmed text. Returns the normalized keyword with the command.
    pub fn lookup(&self, input: &str) -> Option<(String, &Command)> {
        let keyword = input.trim().to_uppercase();
        let command = self.entries.get(&keyword)?;
        Some((keyword, command))
    }

    pub fn keywords(&self) -> Vec<&str> {
        let mut keywords: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keywords.sort_unstable();
        keywords
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>> FromIterator<(K, Command)> for CommandTable {
    fn from_iter<T: IntoIterator<Item = (K, Command)>>(iter: T) -> Self {
        let mut table = CommandTable::new();
        for (keys, command) in iter {
            table.insert(keys.as_ref(), command);
        }
        table
    }
}

/// Run `command` and, if it succeeds, record `keyword` as the last command.
pub fn execute(
    command: &Command,
    keyword: &str,
    context: &mut DispatchContext,
) -> Result<(), PartError> {
    match command {
        Command::Invoke(handle) => handle(context)?,
        Command::ShellLine(line) => run_shell(line)?,
    }
    context.record(keyword);
    Ok(())
}

fn run_shell(line: &str) -> Result<(), PartError> {
    let mut shell = if cfg!(windows) {
        let mut cmd = process::Command::new("cmd");
        cmd.arg("/C");
        cmd
    } else {
        let mut cmd = process::Command::new("sh");
        cmd.arg("-c");
        cmd
    };

    let status = shell
        .arg(line)
        .status()
        .map_err(|e| PartError::CommandFailed {
            command: line.to_string(),
            reason: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(PartError::CommandFailed {
            command: line.to_string(),
            reason: format!("exited with {status}"),
        })
    }
}
