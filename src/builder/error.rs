//! Build errors for history and chain builders.

use thiserror::Error;

/// Errors that can occur when building histories and chains.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("History limit must be at least 1. Omit .bounded() for an unbounded history")]
    ZeroLimit,

    #[error("Handler '{name}' registered more than once. Handler names must be unique within a chain")]
    DuplicateHandler { name: String },
}
