use std::fmt;
use std::str::FromStr;

/// Line number in a text file (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineNumber(usize);

/// Reasons a line number could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseLineNumberError {
    #[error("line numbers start at 1")]
    Zero,
    #[error("{0:?} is not a line number")]
    NotANumber(String),
}

impl LineNumber {
    /// Create a line number, rejecting zero
    pub fn new(number: usize) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    /// Line number of a 0-based index
    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// 0-based index into a line sequence
    pub fn to_index(self) -> usize {
        self.0 - 1
    }

    /// Whether this line exists in a sequence of `count` lines
    pub fn is_within(self, count: usize) -> bool {
        self.0 <= count
    }
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LineNumber {
    type Err = ParseLineNumberError;

    /// Parse user input, ignoring surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number: usize = trimmed
            .parse()
            .map_err(|_| ParseLineNumberError::NotANumber(trimmed.to_string()))?;
        LineNumber::new(number).ok_or(ParseLineNumberError::Zero)
    }
}

/// Effective content of a sequence at `index`
///
/// Positions past the end of the sequence read as the empty string, which is
/// how a shorter file lines up against a longer one.
pub fn line_at(lines: &[String], index: usize) -> &str {
    lines.get(index).map(String::as_str).unwrap_or("")
}

/// Join lines into text, terminating each one with `\n`
pub fn join_lines(lines: &[String]) -> String {
    let mut text = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}
