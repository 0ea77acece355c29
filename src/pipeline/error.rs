//! Pipeline error types.

use thiserror::Error;

/// Errors surfaced by chain dispatch and middleware stacks.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A handler raised an unexpected failure. Under the default
    /// fail-fast policy this aborts the dispatch.
    #[error("handler '{handler}' faulted: {reason}")]
    HandlerFault {
        /// Name of the faulting handler
        handler: String,
        /// The fault message
        reason: String,
    },

    /// No handler claimed the request. Dispatch reports this as a value;
    /// the error form exists for callers that opt into strict mode via
    /// [`crate::pipeline::Outcome::into_result`].
    #[error("no handler claimed the request")]
    Unhandled,
}
