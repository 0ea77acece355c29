//! Builder API for ergonomic history and chain construction.
//!
//! This module provides fluent builders and macros for assembling
//! histories and handler chains with minimal boilerplate while validating
//! configuration up front.

pub mod chain;
pub mod error;
pub mod history;
pub mod macros;

pub use chain::ChainBuilder;
pub use error::BuildError;
pub use history::HistoryBuilder;

use crate::history::History;
use crate::pipeline::{Chain, Handler};

/// Create a bounded history in one call.
///
/// # Example
///
/// ```
/// use retrace::builder::bounded_history;
///
/// let history = bounded_history::<String>(100).unwrap();
/// assert_eq!(history.limit(), Some(100));
/// ```
pub fn bounded_history<T>(max_history: usize) -> Result<History<T>, BuildError> {
    HistoryBuilder::new().bounded(max_history).build()
}

/// Link pre-boxed handlers into a chain in the given order.
///
/// # Example
///
/// ```
/// use retrace::builder::chain_of;
/// use retrace::pipeline::{FnHandler, Handler, Verdict};
///
/// let handlers: Vec<Box<dyn Handler<i32, i32>>> = vec![
///     Box::new(FnHandler::new("negate", |n: &i32| Ok(Verdict::Handled(-n)))),
/// ];
/// let mut chain = chain_of(handlers).unwrap();
/// assert!(chain.dispatch(&5).unwrap().is_handled());
/// ```
pub fn chain_of<Req, Res>(
    handlers: Vec<Box<dyn Handler<Req, Res>>>,
) -> Result<Chain<Req, Res>, BuildError> {
    ChainBuilder::new().handlers(handlers).build()
}
