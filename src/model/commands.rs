//! Command sequence execution against a probe.
//!
//! Two layers. A fail-fast sequential interpreter mutates the probe it is
//! handed token by token, so a mid-sequence failure leaves earlier
//! mutations in place; it stays private to this module. The exported
//! [`apply_commands`] simulates the full sequence on a clone and commits
//! back only on success, so callers only ever see all-or-nothing behavior.

use super::Probe;

/// Errors from interpreting a command sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The sequence contains a token outside M, L, R.
    #[error("invalid command '{0}': valid commands are M, L, R")]
    InvalidCommand(char),

    /// A move step would leave the plateau.
    #[error("position ({x}, {y}) is outside the plateau bounds (0-{max_x}, 0-{max_y})")]
    OutOfBounds {
        x: i64,
        y: i64,
        max_x: i64,
        max_y: i64,
    },
}

/// A single probe command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Move,
    TurnLeft,
    TurnRight,
}

impl Command {
    /// Parses one token, case-insensitively. An unknown token is reported
    /// in its original case.
    fn from_char(c: char) -> Result<Self, CommandError> {
        match c.to_ascii_uppercase() {
            'M' => Ok(Self::Move),
            'L' => Ok(Self::TurnLeft),
            'R' => Ok(Self::TurnRight),
            _ => Err(CommandError::InvalidCommand(c)),
        }
    }
}

/// Applies a command sequence to the probe atomically.
///
/// The full sequence runs against a clone first; the probe is updated in
/// a single assignment only when every token succeeds. On failure the
/// probe is untouched and the first error propagates unchanged. An empty
/// sequence is a no-op.
pub fn apply_commands(probe: &mut Probe, sequence: &str) -> Result<(), CommandError> {
    let mut shadow = probe.clone();
    execute_commands(&mut shadow, sequence)?;

    probe.x = shadow.x;
    probe.y = shadow.y;
    probe.heading = shadow.heading;
    Ok(())
}

/// Runs the sequence token by token, left to right, stopping at the first
/// invalid token or bounds violation.
fn execute_commands(probe: &mut Probe, sequence: &str) -> Result<(), CommandError> {
    for c in sequence.chars() {
        match Command::from_char(c)? {
            Command::Move => probe.step_forward()?,
            Command::TurnLeft => probe.turn_left(),
            Command::TurnRight => probe.turn_right(),
        }
    }
    Ok(())
}
