//! The ordered, short-circuiting handler chain.

use crate::pipeline::error::PipelineError;
use crate::pipeline::handler::{Handler, Verdict};
use std::fmt;
use tracing::{debug, warn};

/// What dispatch should do when a handler faults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Abort the dispatch and surface the fault (default). Skipping a
    /// core business-rule handler silently would be unsafe, so this must
    /// be the default.
    #[default]
    FailFast,
    /// Log the fault and continue with the next handler. Opt-in, for
    /// non-critical cross-cutting handlers.
    Skip,
}

/// Terminal outcome of a dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<Res> {
    /// A handler claimed the request.
    Handled {
        /// Name of the claiming handler
        handler: String,
        /// The handler's result
        response: Res,
    },
    /// Every handler declined. Distinct from a handled-with-empty-result
    /// outcome.
    Unhandled,
}

impl<Res> Outcome<Res> {
    /// Whether some handler claimed the request.
    pub fn is_handled(&self) -> bool {
        matches!(self, Outcome::Handled { .. })
    }

    /// Treat `Unhandled` as an error, for callers that consider an
    /// unclaimed request fatal.
    pub fn into_result(self) -> Result<Res, PipelineError> {
        match self {
            Outcome::Handled { response, .. } => Ok(response),
            Outcome::Unhandled => Err(PipelineError::Unhandled),
        }
    }
}

/// Ordered sequence of handlers with first-claim-wins dispatch.
///
/// The chain structure is fixed once built (see
/// [`crate::builder::ChainBuilder`]); each dispatch is a stateless
/// traversal over it. Handlers are tried strictly in registration order
/// and the first [`Verdict::Handled`] terminates the walk.
///
/// # Example
///
/// ```rust
/// use retrace::builder::ChainBuilder;
/// use retrace::pipeline::{FnHandler, Outcome, Verdict};
///
/// let mut chain = ChainBuilder::new()
///     .handler(FnHandler::new("small", |n: &u32| {
///         if *n < 10 {
///             Ok(Verdict::Handled("small number".to_string()))
///         } else {
///             Ok(Verdict::Pass)
///         }
///     }))
///     .handler(FnHandler::new("large", |_: &u32| {
///         Ok(Verdict::Handled("large number".to_string()))
///     }))
///     .build()
///     .unwrap();
///
/// let outcome = chain.dispatch(&3).unwrap();
/// assert_eq!(
///     outcome,
///     Outcome::Handled {
///         handler: "small".to_string(),
///         response: "small number".to_string(),
///     },
/// );
/// ```
pub struct Chain<Req, Res> {
    handlers: Vec<Box<dyn Handler<Req, Res>>>,
    on_fault: FaultPolicy,
}

impl<Req, Res> Chain<Req, Res> {
    pub(crate) fn from_parts(
        handlers: Vec<Box<dyn Handler<Req, Res>>>,
        on_fault: FaultPolicy,
    ) -> Self {
        Chain { handlers, on_fault }
    }

    /// Walk the chain until a handler claims the request.
    ///
    /// Returns [`Outcome::Unhandled`] when every handler declines. An
    /// empty chain dispatches as a no-op and logs a configuration
    /// warning. A faulting handler aborts the dispatch under
    /// [`FaultPolicy::FailFast`] and is logged and skipped under
    /// [`FaultPolicy::Skip`].
    pub fn dispatch(&mut self, request: &Req) -> Result<Outcome<Res>, PipelineError> {
        if self.handlers.is_empty() {
            warn!("dispatch on an empty chain; no handler can claim the request");
            return Ok(Outcome::Unhandled);
        }

        let on_fault = self.on_fault;
        for handler in self.handlers.iter_mut() {
            match handler.handle(request) {
                Ok(Verdict::Handled(response)) => {
                    debug!(handler = handler.name(), "request claimed");
                    return Ok(Outcome::Handled {
                        handler: handler.name().to_string(),
                        response,
                    });
                }
                Ok(Verdict::Pass) => continue,
                Err(fault) => match on_fault {
                    FaultPolicy::FailFast => {
                        return Err(PipelineError::HandlerFault {
                            handler: handler.name().to_string(),
                            reason: fault.0,
                        });
                    }
                    FaultPolicy::Skip => {
                        warn!(handler = handler.name(), %fault, "handler fault skipped");
                        continue;
                    }
                },
            }
        }

        debug!("request exhausted the chain unclaimed");
        Ok(Outcome::Unhandled)
    }

    /// Number of handlers in the chain.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the chain has no handlers.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// The configured fault policy.
    pub fn fault_policy(&self) -> FaultPolicy {
        self.on_fault
    }
}

impl<Req, Res> fmt::Debug for Chain<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("handlers", &self.handlers.len())
            .field("on_fault", &self.on_fault)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::handler::{Fault, FnHandler};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn decliner(name: &str, calls: Arc<AtomicUsize>) -> FnHandler<String, String> {
        FnHandler::new(name, move |_: &String| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Verdict::Pass)
        })
    }

    fn claimer(name: &str, calls: Arc<AtomicUsize>) -> FnHandler<String, String> {
        let name_owned = name.to_string();
        FnHandler::new(name, move |req: &String| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Verdict::Handled(format!("{name_owned}: {req}")))
        })
    }

    #[test]
    fn first_claim_wins_and_later_handlers_are_skipped() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let third = Arc::new(AtomicUsize::new(0));

        let mut chain: Chain<String, String> = Chain::from_parts(
            vec![
                Box::new(decliner("h1", Arc::clone(&first))),
                Box::new(claimer("h2", Arc::clone(&second))),
                Box::new(claimer("h3", Arc::clone(&third))),
            ],
            FaultPolicy::FailFast,
        );

        let outcome = chain.dispatch(&"ping".to_string()).unwrap();
        assert_eq!(
            outcome,
            Outcome::Handled {
                handler: "h2".to_string(),
                response: "h2: ping".to_string(),
            }
        );
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(third.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn exhausted_chain_reports_unhandled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut chain: Chain<String, String> = Chain::from_parts(
            vec![
                Box::new(decliner("h1", Arc::clone(&calls))),
                Box::new(decliner("h2", Arc::clone(&calls))),
            ],
            FaultPolicy::FailFast,
        );

        let outcome = chain.dispatch(&"ping".to_string()).unwrap();
        assert_eq!(outcome, Outcome::Unhandled);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn empty_chain_dispatches_as_noop() {
        let mut chain: Chain<String, String> =
            Chain::from_parts(Vec::new(), FaultPolicy::FailFast);
        let outcome = chain.dispatch(&"ping".to_string()).unwrap();
        assert_eq!(outcome, Outcome::Unhandled);
    }

    #[test]
    fn fail_fast_aborts_on_fault() {
        let downstream = Arc::new(AtomicUsize::new(0));
        let mut chain: Chain<String, String> = Chain::from_parts(
            vec![
                Box::new(FnHandler::new("broken", |_: &String| {
                    Err(Fault::new("boom"))
                })),
                Box::new(claimer("after", Arc::clone(&downstream))),
            ],
            FaultPolicy::FailFast,
        );

        let err = chain.dispatch(&"ping".to_string()).unwrap_err();
        assert_eq!(
            err,
            PipelineError::HandlerFault {
                handler: "broken".to_string(),
                reason: "boom".to_string(),
            }
        );
        assert_eq!(downstream.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn skip_policy_continues_past_fault() {
        let downstream = Arc::new(AtomicUsize::new(0));
        let mut chain: Chain<String, String> = Chain::from_parts(
            vec![
                Box::new(FnHandler::new("broken", |_: &String| {
                    Err(Fault::new("boom"))
                })),
                Box::new(claimer("after", Arc::clone(&downstream))),
            ],
            FaultPolicy::Skip,
        );

        let outcome = chain.dispatch(&"ping".to_string()).unwrap();
        assert!(outcome.is_handled());
        assert_eq!(downstream.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unhandled_converts_to_error_in_strict_mode() {
        let outcome: Outcome<String> = Outcome::Unhandled;
        assert_eq!(outcome.into_result(), Err(PipelineError::Unhandled));

        let outcome = Outcome::Handled {
            handler: "h".to_string(),
            response: 7i32,
        };
        assert_eq!(outcome.into_result(), Ok(7));
    }

    #[test]
    fn dispatch_is_repeatable() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut chain: Chain<String, String> = Chain::from_parts(
            vec![Box::new(claimer("echo", Arc::clone(&calls)))],
            FaultPolicy::FailFast,
        );

        for _ in 0..3 {
            assert!(chain.dispatch(&"x".to_string()).unwrap().is_handled());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
