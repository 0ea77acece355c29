//! The two-stack undo/redo engine.

use crate::core::{Action, Command, Journal, Record};
use crate::history::error::{HistoryError, Phase};
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;

/// Result of an undo or redo request.
///
/// An empty stack is a benign, reportable outcome rather than an error:
/// UIs routinely call undo with nothing left to undo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// A command was undone or redone.
    Stepped {
        /// Diagnostic name of the command that moved
        command: String,
    },
    /// There was nothing to undo or redo.
    EmptyHistory,
}

impl StepResult {
    /// Whether the request found nothing to do.
    pub fn is_empty(&self) -> bool {
        matches!(self, StepResult::EmptyHistory)
    }
}

/// Linear undo/redo history over a caller-owned target.
///
/// The engine keeps two stacks of submitted commands: the undo stack
/// (most recently applied on top) and the redo stack (most recently
/// undone on top). There is exactly one timeline: executing a new command
/// after an undo discards the redo branch permanently. An optional
/// capacity limit evicts the oldest undo entry when exceeded; evicted
/// commands can never be undone again.
///
/// The engine owns submitted commands exclusively and borrows the target
/// only for the duration of one operation. It performs no internal
/// locking; wrap it in a `Mutex` to share it across threads.
///
/// # Example
///
/// ```rust
/// use retrace::core::FnCommand;
/// use retrace::history::History;
///
/// let mut buffer = String::new();
/// let mut history = History::new();
///
/// let append = FnCommand::infallible(
///     "append hello",
///     |s: &mut String| s.push_str("hello"),
///     |s: &mut String| {
///         let keep = s.len() - 5;
///         s.truncate(keep);
///     },
/// );
///
/// history.execute(append, &mut buffer).unwrap();
/// assert_eq!(buffer, "hello");
/// assert!(history.can_undo());
///
/// history.undo(&mut buffer).unwrap();
/// assert_eq!(buffer, "");
/// assert!(history.can_redo());
///
/// history.redo(&mut buffer).unwrap();
/// assert_eq!(buffer, "hello");
/// ```
pub struct History<T> {
    undo: VecDeque<Box<dyn Command<T>>>,
    redo: Vec<Box<dyn Command<T>>>,
    limit: Option<usize>,
    journal: Journal,
}

impl<T> History<T> {
    /// Create an unbounded history.
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    pub(crate) fn with_limit(limit: Option<usize>) -> Self {
        History {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit,
            journal: Journal::new(),
        }
    }

    /// Apply a command to the target and record it.
    ///
    /// On success the command is pushed onto the undo stack and the redo
    /// branch is discarded. On failure the command is not recorded
    /// anywhere and both stacks are untouched: execution is atomic.
    pub fn execute<C>(&mut self, command: C, target: &mut T) -> Result<(), HistoryError>
    where
        C: Command<T> + 'static,
    {
        let mut command: Box<dyn Command<T>> = Box::new(command);

        command
            .apply(target)
            .map_err(|reason| HistoryError::OperationFailed {
                command: command.name().to_string(),
                phase: Phase::Apply,
                reason,
            })?;

        if !self.redo.is_empty() {
            debug!(discarded = self.redo.len(), "redo branch discarded");
            for discarded in self.redo.drain(..) {
                self.journal
                    .push(Record::new(discarded.name(), Action::Discarded));
            }
        }

        debug!(command = command.name(), "command applied");
        self.journal.push(Record::new(command.name(), Action::Applied));
        self.undo.push_back(command);

        if let Some(limit) = self.limit {
            while self.undo.len() > limit {
                if let Some(evicted) = self.undo.pop_front() {
                    debug!(command = evicted.name(), "oldest history entry evicted");
                    self.journal
                        .push(Record::new(evicted.name(), Action::Evicted));
                }
            }
        }

        Ok(())
    }

    /// Reverse the most recently applied command.
    ///
    /// Reports [`StepResult::EmptyHistory`] when there is nothing to
    /// undo. If the target rejects the inversion, the command stays on
    /// the undo stack and the error is surfaced.
    pub fn undo(&mut self, target: &mut T) -> Result<StepResult, HistoryError> {
        let Some(mut command) = self.undo.pop_back() else {
            debug!("undo requested with empty history");
            return Ok(StepResult::EmptyHistory);
        };

        if let Err(reason) = command.invert(target) {
            let name = command.name().to_string();
            self.undo.push_back(command);
            return Err(HistoryError::OperationFailed {
                command: name,
                phase: Phase::Invert,
                reason,
            });
        }

        let name = command.name().to_string();
        debug!(command = %name, "command undone");
        self.journal.push(Record::new(name.as_str(), Action::Undone));
        self.redo.push(command);
        Ok(StepResult::Stepped { command: name })
    }

    /// Re-apply the most recently undone command.
    ///
    /// Reports [`StepResult::EmptyHistory`] when there is nothing to
    /// redo. If the target rejects the re-application, the command stays
    /// on the redo stack and the error is surfaced.
    pub fn redo(&mut self, target: &mut T) -> Result<StepResult, HistoryError> {
        let Some(mut command) = self.redo.pop() else {
            debug!("redo requested with empty history");
            return Ok(StepResult::EmptyHistory);
        };

        if let Err(reason) = command.apply(target) {
            let name = command.name().to_string();
            self.redo.push(command);
            return Err(HistoryError::OperationFailed {
                command: name,
                phase: Phase::Apply,
                reason,
            });
        }

        let name = command.name().to_string();
        debug!(command = %name, "command redone");
        self.journal.push(Record::new(name.as_str(), Action::Redone));
        self.undo.push_back(command);
        Ok(StepResult::Stepped { command: name })
    }

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of commands on the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of commands on the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Configured capacity limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// The diagnostic journal of everything this engine did.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("undo_depth", &self.undo.len())
            .field("redo_depth", &self.redo.len())
            .field("limit", &self.limit)
            .finish()
    }
}
