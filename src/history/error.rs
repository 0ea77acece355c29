//! History engine error types.

use crate::core::Rejection;
use std::fmt;
use thiserror::Error;

/// Which half of the command contract was running when the target
/// rejected the mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The forward mutation (`execute` or `redo`)
    Apply,
    /// The reverse mutation (`undo`)
    Invert,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Apply => write!(f, "apply"),
            Phase::Invert => write!(f, "invert"),
        }
    }
}

/// Errors surfaced by the history engine.
///
/// An empty undo or redo stack is not an error; it is reported as
/// [`crate::history::StepResult::EmptyHistory`].
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The target rejected the mutation. The stacks were left unchanged
    /// at the failure boundary; the engine never retries.
    #[error("command '{command}' rejected by target during {phase}: {reason}")]
    OperationFailed {
        /// Diagnostic name of the failing command
        command: String,
        /// Whether the forward or reverse mutation failed
        phase: Phase,
        /// The target's stated reason
        reason: Rejection,
    },
}
