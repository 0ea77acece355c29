//! Snapshot-based commands.
//!
//! [`SnapshotCommand`] is the "undo by snapshot" implementation of the
//! [`Command`] contract: before mutating, it captures the whole target as
//! compact binary and `invert` restores that capture wholesale. This
//! trades memory (a full copy of the target per command) for never having
//! to express an inverse computation, which suits targets whose mutations
//! are hard to reverse analytically.
//!
//! For the cheap alternative that recomputes the inverse from the
//! command's own parameters, see [`crate::core::FnCommand`].

use crate::core::{Command, Rejection};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod error;

pub use error::MementoError;

/// A command that undoes by restoring a pre-mutation snapshot.
///
/// `apply` serializes the target with `bincode`, stores the bytes, then
/// runs the forward mutation. `invert` deserializes the stored bytes back
/// into the target. A redo re-captures before re-applying, so the
/// round-trip invariant holds across any undo/redo sequence.
///
/// # Example
///
/// ```rust
/// use retrace::history::History;
/// use retrace::memento::SnapshotCommand;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Document {
///     title: String,
///     body: String,
/// }
///
/// let mut doc = Document {
///     title: "draft".to_string(),
///     body: String::new(),
/// };
/// let mut history = History::new();
///
/// let rewrite = SnapshotCommand::new("rewrite", |d: &mut Document| {
///     d.title = "final".to_string();
///     d.body = "all new content".to_string();
///     Ok(())
/// });
///
/// history.execute(rewrite, &mut doc).unwrap();
/// assert_eq!(doc.title, "final");
///
/// history.undo(&mut doc).unwrap();
/// assert_eq!(doc.title, "draft");
/// assert!(doc.body.is_empty());
/// ```
pub struct SnapshotCommand<T> {
    name: String,
    mutate: Box<dyn FnMut(&mut T) -> Result<(), Rejection> + Send>,
    before: Option<Vec<u8>>,
}

impl<T> SnapshotCommand<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a snapshot command from a forward mutation.
    pub fn new<F>(name: impl Into<String>, mutate: F) -> Self
    where
        F: FnMut(&mut T) -> Result<(), Rejection> + Send + 'static,
    {
        SnapshotCommand {
            name: name.into(),
            mutate: Box::new(mutate),
            before: None,
        }
    }

    fn capture(target: &T) -> Result<Vec<u8>, MementoError> {
        bincode::serialize(target).map_err(|e| MementoError::SnapshotFailed(e.to_string()))
    }

    fn restore(bytes: &[u8]) -> Result<T, MementoError> {
        bincode::deserialize(bytes).map_err(|e| MementoError::RestoreFailed(e.to_string()))
    }
}

impl<T> Command<T> for SnapshotCommand<T>
where
    T: Serialize + DeserializeOwned,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&mut self, target: &mut T) -> Result<(), Rejection> {
        let before = Self::capture(target).map_err(Rejection::from)?;
        (self.mutate)(target)?;
        // Stored only once the mutation succeeds, so a rejected apply
        // leaves the command in its previous state.
        self.before = Some(before);
        Ok(())
    }

    fn invert(&mut self, target: &mut T) -> Result<(), Rejection> {
        let bytes = self.before.as_ref().ok_or(MementoError::MissingSnapshot)?;
        *target = Self::restore(bytes).map_err(Rejection::from)?;
        Ok(())
    }
}
