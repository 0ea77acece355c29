//! The decorating middleware variant.
//!
//! Where a [`crate::pipeline::Chain`] stops at the first handler that
//! claims a request, a middleware [`Stack`] wraps every call in layers:
//! each layer runs before and after the rest of the stack, and may
//! transform the downstream result. Ordering is significant: the
//! outermost-registered layer's pre-step runs first and its post-step
//! runs last.

use crate::pipeline::error::PipelineError;
use std::fmt;
use tracing::debug;

/// Trait for layers that wrap the rest of a [`Stack`].
///
/// An implementation does any pre-work, delegates via [`Next::run`], then
/// does any post-work on the downstream result. Not calling `next` at all
/// short-circuits the stack (a cache hit, for example).
///
/// # Example
///
/// ```rust
/// use retrace::pipeline::{Middleware, Next, PipelineError, Stack};
///
/// struct Exclaim;
///
/// impl Middleware<String, String> for Exclaim {
///     fn name(&self) -> &str {
///         "exclaim"
///     }
///
///     fn around(
///         &self,
///         request: &String,
///         next: Next<'_, String, String>,
///     ) -> Result<String, PipelineError> {
///         let response = next.run(request)?;
///         Ok(format!("{response}!"))
///     }
/// }
///
/// let stack = Stack::new(|req: &String| Ok(req.to_uppercase())).layer(Exclaim);
/// assert_eq!(stack.call(&"hey".to_string()).unwrap(), "HEY!");
/// ```
pub trait Middleware<Req, Res>: Send {
    /// The layer's name for diagnostics.
    fn name(&self) -> &str;

    /// Wrap the rest of the stack.
    fn around(&self, request: &Req, next: Next<'_, Req, Res>) -> Result<Res, PipelineError>;
}

/// Handle on the remainder of a [`Stack`], passed to each layer.
pub struct Next<'a, Req, Res> {
    layers: &'a [Box<dyn Middleware<Req, Res>>],
    inner: &'a (dyn Fn(&Req) -> Result<Res, PipelineError> + Send),
}

impl<'a, Req, Res> Next<'a, Req, Res> {
    /// Invoke the rest of the stack: the next layer if one remains,
    /// otherwise the wrapped inner operation.
    pub fn run(self, request: &Req) -> Result<Res, PipelineError> {
        match self.layers.split_first() {
            Some((layer, rest)) => {
                debug!(layer = layer.name(), "entering middleware layer");
                layer.around(
                    request,
                    Next {
                        layers: rest,
                        inner: self.inner,
                    },
                )
            }
            None => (self.inner)(request),
        }
    }
}

/// An inner operation wrapped in ordered middleware layers.
///
/// Layers registered first sit outermost. The stack is immutable once
/// assembled; each [`Stack::call`] is an independent traversal.
pub struct Stack<Req, Res> {
    layers: Vec<Box<dyn Middleware<Req, Res>>>,
    inner: Box<dyn Fn(&Req) -> Result<Res, PipelineError> + Send>,
}

impl<Req, Res> Stack<Req, Res> {
    /// Create a stack around a bare inner operation.
    pub fn new<F>(inner: F) -> Self
    where
        F: Fn(&Req) -> Result<Res, PipelineError> + Send + 'static,
    {
        Stack {
            layers: Vec::new(),
            inner: Box::new(inner),
        }
    }

    /// Add a layer outside everything registered after it.
    pub fn layer<M>(mut self, middleware: M) -> Self
    where
        M: Middleware<Req, Res> + 'static,
    {
        self.layers.push(Box::new(middleware));
        self
    }

    /// Run the request through every layer down to the inner operation.
    pub fn call(&self, request: &Req) -> Result<Res, PipelineError> {
        Next {
            layers: &self.layers,
            inner: &*self.inner,
        }
        .run(request)
    }

    /// Number of layers around the inner operation.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }
}

impl<Req, Res> fmt::Debug for Stack<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("layers", &self.layers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Records its pre and post steps into a shared trace.
    struct Tracer {
        name: String,
        trace: Arc<Mutex<Vec<String>>>,
    }

    impl Tracer {
        fn new(name: &str, trace: Arc<Mutex<Vec<String>>>) -> Self {
            Tracer {
                name: name.to_string(),
                trace,
            }
        }

        fn note(&self, step: &str) {
            self.trace
                .lock()
                .unwrap()
                .push(format!("{} {step}", self.name));
        }
    }

    impl Middleware<String, String> for Tracer {
        fn name(&self) -> &str {
            &self.name
        }

        fn around(
            &self,
            request: &String,
            next: Next<'_, String, String>,
        ) -> Result<String, PipelineError> {
            self.note("pre");
            let response = next.run(request);
            self.note("post");
            response
        }
    }

    #[test]
    fn layers_nest_in_onion_order() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let stack = Stack::new(|req: &String| Ok(format!("inner({req})")))
            .layer(Tracer::new("outer", Arc::clone(&trace)))
            .layer(Tracer::new("middle", Arc::clone(&trace)));

        let response = stack.call(&"req".to_string()).unwrap();
        assert_eq!(response, "inner(req)");
        assert_eq!(
            *trace.lock().unwrap(),
            vec!["outer pre", "middle pre", "middle post", "outer post"]
        );
    }

    #[test]
    fn layer_can_transform_downstream_result() {
        struct Suffix;

        impl Middleware<String, String> for Suffix {
            fn name(&self) -> &str {
                "suffix"
            }

            fn around(
                &self,
                request: &String,
                next: Next<'_, String, String>,
            ) -> Result<String, PipelineError> {
                Ok(format!("{}+wrapped", next.run(request)?))
            }
        }

        let stack = Stack::new(|req: &String| Ok(req.clone())).layer(Suffix);
        assert_eq!(stack.call(&"base".to_string()).unwrap(), "base+wrapped");
    }

    #[test]
    fn caching_layer_short_circuits_the_stack() {
        struct Cache {
            entries: RefCell<HashMap<String, String>>,
        }

        impl Middleware<String, String> for Cache {
            fn name(&self) -> &str {
                "cache"
            }

            fn around(
                &self,
                request: &String,
                next: Next<'_, String, String>,
            ) -> Result<String, PipelineError> {
                if let Some(hit) = self.entries.borrow().get(request) {
                    return Ok(hit.clone());
                }
                let response = next.run(request)?;
                self.entries
                    .borrow_mut()
                    .insert(request.clone(), response.clone());
                Ok(response)
            }
        }

        let inner_calls = Arc::new(Mutex::new(0usize));
        let counted = Arc::clone(&inner_calls);
        let stack = Stack::new(move |req: &String| {
            *counted.lock().unwrap() += 1;
            Ok(req.to_uppercase())
        })
        .layer(Cache {
            entries: RefCell::new(HashMap::new()),
        });

        assert_eq!(stack.call(&"hey".to_string()).unwrap(), "HEY");
        assert_eq!(stack.call(&"hey".to_string()).unwrap(), "HEY");
        assert_eq!(*inner_calls.lock().unwrap(), 1);
    }

    #[test]
    fn inner_error_propagates_through_layers() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let stack: Stack<String, String> = Stack::new(|_: &String| {
            Err(PipelineError::HandlerFault {
                handler: "inner".to_string(),
                reason: "io error".to_string(),
            })
        })
        .layer(Tracer::new("outer", Arc::clone(&trace)));

        let err = stack.call(&"req".to_string()).unwrap_err();
        assert!(matches!(err, PipelineError::HandlerFault { .. }));
        // The layer's post-step still ran around the failure.
        assert_eq!(*trace.lock().unwrap(), vec!["outer pre", "outer post"]);
    }

    #[test]
    fn empty_stack_calls_inner_directly() {
        let stack = Stack::new(|n: &i32| Ok(n * 2));
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.call(&21).unwrap(), 42);
    }
}
