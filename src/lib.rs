//! Retrace: linear undo/redo command history and short-circuiting
//! handler pipelines.
//!
//! Two small, independent components:
//!
//! - **History engine** ([`history::History`]): records reversible
//!   [`core::Command`]s applied to a caller-owned target and replays them
//!   backwards and forwards. Two stacks, one linear timeline: executing a
//!   new command after an undo discards the redo branch.
//! - **Responsibility pipeline** ([`pipeline::Chain`] and
//!   [`pipeline::Stack`]): ordered handlers where the first to claim a
//!   request wins, plus decorating middleware layers that wrap an inner
//!   operation with pre/post behavior.
//!
//! Both are synchronous call/return structures with no internal locking;
//! wrap them in a `Mutex` to share across threads. Everything they store
//! is `Send`.
//!
//! # Core Concepts
//!
//! - **Command**: a reified, reversible mutation (`apply` / `invert`)
//! - **Target**: the caller-owned value commands mutate; borrowed only
//!   for the duration of one operation
//! - **Handler**: a named chain participant that claims or declines a
//!   request
//! - **Middleware**: a layer wrapping the rest of a stack in onion order
//!
//! # Example
//!
//! ```rust
//! use retrace::core::FnCommand;
//! use retrace::history::History;
//!
//! let mut buffer = String::new();
//! let mut history = History::new();
//!
//! let append = FnCommand::infallible(
//!     "append greeting",
//!     |s: &mut String| s.push_str("hello"),
//!     |s: &mut String| {
//!         let keep = s.len() - 5;
//!         s.truncate(keep);
//!     },
//! );
//!
//! history.execute(append, &mut buffer).unwrap();
//! assert_eq!(buffer, "hello");
//!
//! history.undo(&mut buffer).unwrap();
//! assert_eq!(buffer, "");
//!
//! history.redo(&mut buffer).unwrap();
//! assert_eq!(buffer, "hello");
//! ```

pub mod builder;
pub mod core;
pub mod history;
pub mod memento;
pub mod pipeline;

// Re-export commonly used types
pub use crate::core::{Command, FnCommand, Rejection};
pub use crate::history::{History, HistoryError, StepResult};
pub use crate::pipeline::{Chain, Handler, Outcome, Verdict};
