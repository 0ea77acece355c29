//! Snapshot error types.

use crate::core::Rejection;
use thiserror::Error;

/// Errors that can occur while capturing or restoring a snapshot.
#[derive(Debug, Error)]
pub enum MementoError {
    /// Serializing the target to snapshot bytes failed
    #[error("Snapshot capture failed: {0}")]
    SnapshotFailed(String),

    /// Deserializing the target from snapshot bytes failed
    #[error("Snapshot restore failed: {0}")]
    RestoreFailed(String),

    /// Invert was requested before any snapshot had been captured
    #[error("No snapshot captured; apply the command before inverting it")]
    MissingSnapshot,
}

impl From<MementoError> for Rejection {
    fn from(err: MementoError) -> Self {
        Rejection::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memento_error_converts_to_rejection() {
        let rejection: Rejection = MementoError::MissingSnapshot.into();
        assert!(rejection.to_string().contains("No snapshot captured"));
    }
}
