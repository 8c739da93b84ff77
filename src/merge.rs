//! Interactive resolution of differences into a single line sequence.

use crate::diff::Difference;
use crate::error::{Error, Result};
use crate::line::line_at;
use crate::prompt::Interaction;
use std::str::FromStr;
use tracing::debug;

/// Which side of a difference to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    First,
    Second,
}

impl Selection {
    /// Content of the chosen side
    pub fn pick<'a>(self, diff: &'a Difference) -> &'a str {
        match self {
            Selection::First => &diff.left,
            Selection::Second => &diff.right,
        }
    }
}

impl FromStr for Selection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(Selection::First),
            "2" => Ok(Selection::Second),
            other => Err(Error::InvalidSelection(other.to_string())),
        }
    }
}

/// Line used at positions that have no pending difference
///
/// Always taken from whichever sequence is longer overall, and from the
/// second one when both have the same length. The choice ignores which side
/// actually has content at `index`.
pub fn default_line<'a>(left: &'a [String], right: &'a [String], index: usize) -> &'a str {
    if left.len() > right.len() {
        line_at(left, index)
    } else {
        line_at(right, index)
    }
}

/// Ask until the user answers `1` or `2`
fn ask_selection(diff: &Difference, interaction: &mut dyn Interaction) -> Result<Selection> {
    interaction.say(&format!("Line {} differs:", diff.line_number))?;
    interaction.say(&format!("1: {}", diff.left))?;
    interaction.say(&format!("2: {}", diff.right))?;

    let mut message = "Choose which line to save (1/2): ";
    loop {
        let Some(answer) = interaction.prompt(message)? else {
            return Err(Error::InputClosed(format!(
                "choice for line {}",
                diff.line_number
            )));
        };
        match answer.parse::<Selection>() {
            Ok(selection) => return Ok(selection),
            Err(err) => {
                debug!(line = diff.line_number, %err, "rejected selection");
                message = "Invalid choice. Please enter 1 or 2: ";
            }
        }
    }
}

/// Merge two sequences, asking the user to settle each difference
///
/// Walks every position up to the longer sequence's length. A position
/// matching the next pending difference is resolved by the user; any other
/// position takes [`default_line`]. The result always has
/// `max(left.len(), right.len())` lines.
pub fn merge(
    left: &[String],
    right: &[String],
    differences: &[Difference],
    interaction: &mut dyn Interaction,
) -> Result<Vec<String>> {
    let max_lines = left.len().max(right.len());
    let mut merged = Vec::with_capacity(max_lines);
    let mut pending = differences.iter().peekable();

    for i in 0..max_lines {
        match pending.next_if(|diff| diff.line_number == i + 1) {
            Some(diff) => {
                let selection = ask_selection(diff, interaction)?;
                merged.push(selection.pick(diff).to_string());
            }
            None => merged.push(default_line(left, right, i).to_string()),
        }
    }

    debug!(lines = merged.len(), "merge complete");
    Ok(merged)
}
