//! Request/response turns with the user.
//!
//! Merge choices and edit requests go through [`Interaction`] so the merge
//! and edit logic can run against a terminal or a scripted list of answers.

use crate::error::{Error, Result};
use dialoguer::Confirm;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// A synchronous conversation with the user
pub trait Interaction {
    /// Show `message` and wait for one line of input
    ///
    /// Returns `Ok(None)` once the input is exhausted. The returned line has
    /// its terminator removed.
    fn prompt(&mut self, message: &str) -> Result<Option<String>>;

    /// Show a line of output that needs no answer
    fn say(&mut self, message: &str) -> Result<()>;

    /// Ask a yes/no question
    ///
    /// Only `Y` or `y` accepts; any other answer or closed input declines.
    fn confirm(&mut self, message: &str) -> Result<bool> {
        self.say(message)?;
        let answer = self.prompt("")?;
        Ok(matches!(answer.as_deref().map(str::trim), Some("Y" | "y")))
    }
}

/// Interaction over a line-oriented reader and a writer
pub struct TerminalInteraction<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalInteraction<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer, e.g. to inspect what was printed
    pub fn into_output(self) -> W {
        self.output
    }
}

impl TerminalInteraction<io::StdinLock<'static>, io::Stdout> {
    /// Interaction on the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Interaction for TerminalInteraction<R, W> {
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

/// Interaction on an attached terminal
///
/// Line answers are read like [`TerminalInteraction`]; yes/no questions use
/// a `dialoguer` confirmation.
pub struct ConsoleInteraction {
    lines: TerminalInteraction<io::StdinLock<'static>, io::Stdout>,
}

impl ConsoleInteraction {
    pub fn new() -> Self {
        Self {
            lines: TerminalInteraction::stdio(),
        }
    }
}

impl Default for ConsoleInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction for ConsoleInteraction {
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        self.lines.prompt(message)
    }

    fn say(&mut self, message: &str) -> Result<()> {
        self.lines.say(message)
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        self.lines.output.flush()?;
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(|e| Error::Io(io::Error::other(format!("Failed to read confirmation: {e}"))))
    }
}

/// Interaction that replays canned answers and records everything shown
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    answers: VecDeque<String>,
    /// Prompts and messages in the order they were shown
    pub transcript: Vec<String>,
}

impl ScriptedInteraction {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Interaction for ScriptedInteraction {
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        self.transcript.push(message.to_string());
        Ok(self.answers.pop_front())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        self.transcript.push(message.to_string());
        Ok(())
    }
}
