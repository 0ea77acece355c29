//! The responsibility pipeline.
//!
//! Two dispatch shapes over the same idea of ordered, independent
//! participants:
//!
//! - [`Chain`]: handlers tried strictly in registration order; the first
//!   to claim the request wins, the rest are never consulted. Requests no
//!   handler claims come back as [`Outcome::Unhandled`].
//! - [`Stack`]: decorating middleware layers wrapping an inner operation
//!   with pre/post behavior in onion order.
//!
//! Chains are immutable after construction (see
//! [`crate::builder::ChainBuilder`]); every dispatch is a stateless
//! traversal of the fixed structure.

mod chain;
mod error;
mod handler;
mod middleware;

pub use chain::{Chain, FaultPolicy, Outcome};
pub use error::PipelineError;
pub use handler::{Fault, FnHandler, Handler, Verdict};
pub use middleware::{Middleware, Next, Stack};
