//! The command history engine.
//!
//! A [`History`] records reversible commands applied to a caller-owned
//! target and replays them backwards and forwards:
//!
//! - `execute` applies a command and pushes it onto the undo stack,
//!   discarding any redo branch
//! - `undo` / `redo` move commands between the two stacks, replaying
//!   their reverse/forward effect on the target
//! - an optional capacity limit evicts the oldest entry permanently
//!
//! Failures are atomic: a command the target rejects is never recorded,
//! and a failed undo/redo leaves both stacks exactly as they were.

mod engine;
mod error;

pub use engine::{History, StepResult};
pub use error::{HistoryError, Phase};
