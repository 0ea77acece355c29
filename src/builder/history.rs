//! Builder for configuring history engines.

use crate::builder::error::BuildError;
use crate::history::History;

/// Builder for a [`History`] with a fluent API.
///
/// The only configuration knob is the capacity limit: unbounded by
/// default, or `bounded(n)` to evict the oldest entry once the undo
/// stack would exceed `n`.
#[derive(Clone, Debug, Default)]
pub struct HistoryBuilder {
    limit: Option<usize>,
}

impl HistoryBuilder {
    /// Create a builder for an unbounded history.
    pub fn new() -> Self {
        HistoryBuilder { limit: None }
    }

    /// Keep at most `max_history` undoable commands, evicting the oldest.
    pub fn bounded(mut self, max_history: usize) -> Self {
        self.limit = Some(max_history);
        self
    }

    /// Build the history.
    /// Returns an error for a zero limit, which would make every command
    /// unrecordable.
    pub fn build<T>(self) -> Result<History<T>, BuildError> {
        if self.limit == Some(0) {
            return Err(BuildError::ZeroLimit);
        }
        Ok(History::with_limit(self.limit))
    }
}
