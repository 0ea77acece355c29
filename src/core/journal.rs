//! Diagnostic journal of history engine activity.
//!
//! The journal is an append-only, serializable log of everything the
//! engine did to its commands: applications, undos, redos, evictions and
//! branch discards. It exists for diagnostics and for callers that want to
//! persist an audit trail themselves; the engine never reads it back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// What the engine did with a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// The command was applied and pushed onto the undo stack.
    Applied,
    /// The command was inverted and moved to the redo stack.
    Undone,
    /// The command was re-applied and moved back to the undo stack.
    Redone,
    /// The command was evicted from a bounded history; it can no longer
    /// be undone.
    Evicted,
    /// The command's redo branch was discarded by a new execution.
    Discarded,
}

/// One journal entry.
///
/// Every entry gets a fresh v4 UUID so diagnostics can refer to a specific
/// occurrence even when the same command name appears many times.
///
/// # Example
///
/// ```rust
/// use retrace::core::{Action, Record};
///
/// let record = Record::new("append text", Action::Applied);
/// assert_eq!(record.command, "append text");
/// assert_eq!(record.action, Action::Applied);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier for this occurrence
    pub id: Uuid,
    /// The command's diagnostic name
    pub command: String,
    /// What happened to the command
    pub action: Action,
    /// When it happened
    pub at: DateTime<Utc>,
}

impl Record {
    /// Create a record stamped with the current time and a fresh id.
    pub fn new(command: impl Into<String>, action: Action) -> Self {
        Record {
            id: Uuid::new_v4(),
            command: command.into(),
            action,
            at: Utc::now(),
        }
    }
}

/// Ordered, append-only log of [`Record`]s.
///
/// # Example
///
/// ```rust
/// use retrace::core::{Action, Journal, Record};
///
/// let mut journal = Journal::new();
/// journal.push(Record::new("append text", Action::Applied));
/// journal.push(Record::new("append text", Action::Undone));
///
/// assert_eq!(journal.len(), 2);
/// assert_eq!(journal.records()[1].action, Action::Undone);
///
/// // Round-trip through JSON for external persistence.
/// let json = journal.to_json().unwrap();
/// let restored = Journal::from_json(&json).unwrap();
/// assert_eq!(restored.len(), 2);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Journal {
    records: Vec<Record>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Journal {
            records: Vec::new(),
        }
    }

    /// Append a record.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// All records in order of occurrence.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the journal has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Span between the first and last record.
    ///
    /// Returns `None` for an empty journal.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.at.signed_duration_since(first.at);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Serialize the journal to JSON for external persistence.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a journal from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_journal_is_empty() {
        let journal = Journal::new();
        assert!(journal.is_empty());
        assert_eq!(journal.len(), 0);
        assert!(journal.duration().is_none());
    }

    #[test]
    fn push_preserves_order() {
        let mut journal = Journal::new();
        journal.push(Record::new("first", Action::Applied));
        journal.push(Record::new("second", Action::Applied));
        journal.push(Record::new("second", Action::Undone));

        let commands: Vec<&str> = journal
            .records()
            .iter()
            .map(|r| r.command.as_str())
            .collect();
        assert_eq!(commands, vec!["first", "second", "second"]);
        assert_eq!(journal.records()[2].action, Action::Undone);
    }

    #[test]
    fn records_get_distinct_ids() {
        let a = Record::new("same name", Action::Applied);
        let b = Record::new("same name", Action::Applied);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn duration_spans_first_to_last() {
        let mut journal = Journal::new();
        journal.push(Record::new("start", Action::Applied));

        std::thread::sleep(Duration::from_millis(10));
        journal.push(Record::new("end", Action::Applied));

        let duration = journal.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= Duration::from_millis(10));
    }

    #[test]
    fn single_record_has_duration_zero() {
        let mut journal = Journal::new();
        journal.push(Record::new("only", Action::Applied));
        assert_eq!(journal.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn journal_round_trips_through_json() {
        let mut journal = Journal::new();
        journal.push(Record::new("append", Action::Applied));
        journal.push(Record::new("append", Action::Undone));

        let json = journal.to_json().unwrap();
        let restored = Journal::from_json(&json).unwrap();

        assert_eq!(restored.len(), journal.len());
        assert_eq!(restored.records()[0].id, journal.records()[0].id);
        assert_eq!(restored.records()[1].action, Action::Undone);
    }
}
