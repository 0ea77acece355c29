//! The handler contract for short-circuiting chains.

use std::fmt;
use thiserror::Error;

/// What a handler decided about a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict<Res> {
    /// The handler fully resolved the request; propagation stops and
    /// this is the chain's result.
    Handled(Res),
    /// The handler declined; the request moves to the next handler
    /// unchanged.
    Pass,
}

/// An unexpected failure inside a handler, distinct from declining.
///
/// A handler that cannot claim a request returns [`Verdict::Pass`]; a
/// `Fault` means the handler itself broke while deciding.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct Fault(pub String);

impl Fault {
    /// Create a fault from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Fault(message.into())
    }
}

/// Trait for named participants in a [`crate::pipeline::Chain`].
///
/// Handlers are consulted strictly in registration order; the first one
/// returning [`Verdict::Handled`] wins and later handlers are never
/// invoked for that request.
///
/// # Example
///
/// ```rust
/// use retrace::pipeline::{Fault, Handler, Verdict};
///
/// struct Doubler;
///
/// impl Handler<i32, i32> for Doubler {
///     fn name(&self) -> &str {
///         "doubler"
///     }
///
///     fn handle(&mut self, request: &i32) -> Result<Verdict<i32>, Fault> {
///         if *request % 2 == 0 {
///             Ok(Verdict::Handled(request * 2))
///         } else {
///             Ok(Verdict::Pass)
///         }
///     }
/// }
///
/// let mut doubler = Doubler;
/// assert_eq!(doubler.handle(&4).unwrap(), Verdict::Handled(8));
/// assert_eq!(doubler.handle(&3).unwrap(), Verdict::Pass);
/// ```
pub trait Handler<Req, Res>: Send {
    /// The handler's name, unique within a chain.
    fn name(&self) -> &str;

    /// Inspect the request and either claim it or pass it on.
    fn handle(&mut self, request: &Req) -> Result<Verdict<Res>, Fault>;
}

/// Closure-backed handler.
///
/// # Example
///
/// ```rust
/// use retrace::pipeline::{FnHandler, Handler, Verdict};
///
/// let mut shouter = FnHandler::new("shouter", |req: &String| {
///     if req.ends_with('!') {
///         Ok(Verdict::Handled(req.to_uppercase()))
///     } else {
///         Ok(Verdict::Pass)
///     }
/// });
///
/// let request = "hey!".to_string();
/// assert_eq!(
///     shouter.handle(&request).unwrap(),
///     Verdict::Handled("HEY!".to_string()),
/// );
/// ```
pub struct FnHandler<Req, Res> {
    name: String,
    handle: Box<dyn FnMut(&Req) -> Result<Verdict<Res>, Fault> + Send>,
}

impl<Req, Res> FnHandler<Req, Res> {
    /// Create a handler from a name and a closure.
    pub fn new<F>(name: impl Into<String>, handle: F) -> Self
    where
        F: FnMut(&Req) -> Result<Verdict<Res>, Fault> + Send + 'static,
    {
        FnHandler {
            name: name.into(),
            handle: Box::new(handle),
        }
    }
}

impl<Req, Res> Handler<Req, Res> for FnHandler<Req, Res> {
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&mut self, request: &Req) -> Result<Verdict<Res>, Fault> {
        (self.handle)(request)
    }
}

impl<Req, Res> fmt::Debug for FnHandler<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").field("name", &self.name).finish()
    }
}
