//! Instrumented Middleware Stack
//!
//! This example demonstrates the decorating pipeline variant: timing and
//! caching layers wrapped around a slow lookup operation.
//!
//! Key concepts:
//! - Onion ordering: the outermost layer's pre-step runs first and its
//!   post-step runs last
//! - A layer may short-circuit the stack by not delegating (cache hit)
//!
//! Run with: cargo run --example instrumented_pipeline

use retrace::pipeline::{Middleware, Next, PipelineError, Stack};
use std::cell::RefCell;
use std::collections::HashMap;
use std::thread;
use std::time::{Duration, Instant};

struct Timing;

impl Middleware<String, String> for Timing {
    fn name(&self) -> &str {
        "timing"
    }

    fn around(
        &self,
        request: &String,
        next: Next<'_, String, String>,
    ) -> Result<String, PipelineError> {
        let started = Instant::now();
        let response = next.run(request);
        println!("  [timing] {request:?} took {:?}", started.elapsed());
        response
    }
}

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
            println!("  [cache] hit for {request:?}");
            return Ok(hit.clone());
        }
        let response = next.run(request)?;
        self.entries
            .borrow_mut()
            .insert(request.clone(), response.clone());
        Ok(response)
    }
}

fn main() {
    println!("=== Instrumented Pipeline Example ===\n");

    let stack = Stack::new(|request: &String| {
        // Stand-in for a slow backend call.
        thread::sleep(Duration::from_millis(50));
        Ok(format!("profile of {request}"))
    })
    .layer(Timing)
    .layer(Cache {
        entries: RefCell::new(HashMap::new()),
    });

    for request in ["alice", "bob", "alice"] {
        println!("lookup {request:?}:");
        let response = stack.call(&request.to_string()).unwrap();
        println!("  -> {response}\n");
    }

    println!("=== Example Complete ===");
}
