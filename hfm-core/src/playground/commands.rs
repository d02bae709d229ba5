//! Playground command tracking
//!
//! A playground is a scratch buffer of commands evaluated against the loaded
//! module. A command starts on a line that does not begin with whitespace and
//! extends over every following line that is empty or indented, the way
//! Haskell's off-side rule groups a definition. Commands are evaluated one
//! after another; [`PlaygroundCommands`] remembers which one is next.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::diagnostics::Line;

/// When the playground last changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "at", rename_all = "snake_case")]
pub enum Status {
    /// The code was edited at the given time.
    LastEdited(DateTime<Utc>),
    /// All pending commands were evaluated at the given time.
    LastEvaluated(DateTime<Utc>),
}

impl Status {
    /// Timestamp of the status change.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::LastEdited(at) | Self::LastEvaluated(at) => *at,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastEdited(at) => write!(f, "last edited {}", at.to_rfc3339()),
            Self::LastEvaluated(at) => write!(f, "last evaluated {}", at.to_rfc3339()),
        }
    }
}

/// A single playground command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    /// Position among the playground's commands, starting at 0.
    pub index: usize,
    /// Source text, lines joined with `\n`.
    pub text: String,
    /// 1-based lines covered.
    pub lines: RangeInclusive<Line>,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} (lines {}-{}): {}",
            self.index,
            self.lines.start(),
            self.lines.end(),
            self.text
        )
    }
}

/// The commands of one playground and their evaluation progress.
#[derive(Debug, Clone)]
pub struct PlaygroundCommands {
    source: Vec<String>,
    commands: Vec<RangeInclusive<Line>>,
    next_command: Option<usize>,
    status: Status,
}

impl PlaygroundCommands {
    /// Scans `text` for commands. All commands start out pending.
    #[must_use]
    pub fn scan(text: &str) -> Self {
        let mut commands = Self {
            source: Vec::new(),
            commands: Vec::new(),
            next_command: None,
            status: Status::LastEdited(Utc::now()),
        };
        commands.rescan(text);
        commands
    }

    /// Replaces the playground text and scans it from scratch.
    ///
    /// All commands become pending again and the status becomes `LastEdited`.
    pub fn rescan(&mut self, text: &str) {
        self.source = text.lines().map(str::to_string).collect();
        self.commands = scan_lines(&self.source);
        self.status = Status::LastEdited(Utc::now());
        self.next_command = None;
        self.set_all_commands_pending();
        tracing::debug!(command_count = self.commands.len(), "Playground scanned");
    }

    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if the playground has no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// The next command that needs to be evaluated, if any.
    #[must_use]
    pub fn next_pending_command(&self) -> Option<Command> {
        self.next_command.and_then(|idx| self.query_command(idx))
    }

    /// Restarts evaluation from the first command, e.g. because the module
    /// context changed.
    pub fn set_all_commands_pending(&mut self) {
        if !self.commands.is_empty() {
            self.next_command = Some(0);
        }
    }

    /// Marks `command` as evaluated.
    ///
    /// This succeeds only if `command` is the next pending command and its text
    /// is unchanged. On success the next command becomes pending, or nothing is
    /// pending after the last one and the status becomes `LastEvaluated`.
    pub fn mark_as_completed(&mut self, command: &Command) -> bool {
        let Some(pending) = self.next_command else {
            return false;
        };
        if pending != command.index {
            return false;
        }
        if self.query_command(pending).map(|c| c.text).as_deref() != Some(command.text.as_str()) {
            tracing::debug!(index = pending, "Command text changed before completion");
            return false;
        }
        if pending + 1 < self.commands.len() {
            self.next_command = Some(pending + 1);
        } else {
            self.next_command = None;
            self.status = Status::LastEvaluated(Utc::now());
        }
        true
    }

    /// Returns the `n`th command.
    #[must_use]
    pub fn query_command(&self, n: usize) -> Option<Command> {
        let lines = self.commands.get(n)?.clone();
        let text = self.source[(lines.start() - 1)..*lines.end()].join("\n");
        Some(Command {
            index: n,
            text,
            lines,
        })
    }

    /// All commands in order.
    pub fn iter(&self) -> impl Iterator<Item = Command> + '_ {
        (0..self.commands.len()).filter_map(|n| self.query_command(n))
    }
}

fn starts_command(line: &str) -> bool {
    line.chars().next().is_some_and(|c| !c.is_whitespace())
}

fn scan_lines(lines: &[String]) -> Vec<RangeInclusive<Line>> {
    let mut commands = Vec::new();
    let mut idx = 0;
    while idx < lines.len() {
        if !starts_command(&lines[idx]) {
            idx += 1;
            continue;
        }
        let start = idx;
        idx += 1;
        while idx < lines.len() && !starts_command(&lines[idx]) {
            idx += 1;
        }
        commands.push((start + 1)..=idx);
    }
    commands
}
