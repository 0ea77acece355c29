//! Builder for constructing handler chains.

use crate::builder::error::BuildError;
use crate::pipeline::{Chain, FaultPolicy, Handler};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// Builder for a [`Chain`] with a fluent API.
///
/// Handlers are linked in registration order; `build` validates that no
/// handler name appears twice, which keeps the chain acyclic and each
/// participant at-most-once by construction.
pub struct ChainBuilder<Req, Res> {
    handlers: Vec<Box<dyn Handler<Req, Res>>>,
    on_fault: FaultPolicy,
}

impl<Req, Res> ChainBuilder<Req, Res> {
    /// Create an empty builder with the default fail-fast policy.
    pub fn new() -> Self {
        ChainBuilder {
            handlers: Vec::new(),
            on_fault: FaultPolicy::default(),
        }
    }

    /// Append a handler to the end of the chain.
    pub fn handler<H>(mut self, handler: H) -> Self
    where
        H: Handler<Req, Res> + 'static,
    {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Append multiple pre-boxed handlers at once.
    pub fn handlers(mut self, handlers: Vec<Box<dyn Handler<Req, Res>>>) -> Self {
        self.handlers.extend(handlers);
        self
    }

    /// Set what dispatch does when a handler faults.
    pub fn on_fault(mut self, policy: FaultPolicy) -> Self {
        self.on_fault = policy;
        self
    }

    /// Build the chain.
    /// Returns an error if two handlers share a name. An empty chain is
    /// allowed but logged as a configuration warning, since every
    /// dispatch through it will be unhandled.
    pub fn build(self) -> Result<Chain<Req, Res>, BuildError> {
        let mut seen = HashSet::new();
        for handler in &self.handlers {
            if !seen.insert(handler.name().to_string()) {
                return Err(BuildError::DuplicateHandler {
                    name: handler.name().to_string(),
                });
            }
        }

        if self.handlers.is_empty() {
            warn!("building an empty chain; every dispatch will be unhandled");
        }

        Ok(Chain::from_parts(self.handlers, self.on_fault))
    }
}

impl<Req, Res> Default for ChainBuilder<Req, Res> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Res> fmt::Debug for ChainBuilder<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainBuilder")
            .field("handlers", &self.handlers.len())
            .field("on_fault", &self.on_fault)
            .finish()
    }
}
