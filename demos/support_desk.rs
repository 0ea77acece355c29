//! Support Desk Chain
//!
//! This example demonstrates a short-circuiting handler chain: three
//! support tiers, each claiming only the tickets at its own level.
//!
//! Key concepts:
//! - Handlers tried strictly in registration order
//! - First claim wins; later tiers are never consulted
//! - Unclaimed requests come back as a distinct Unhandled outcome
//!
//! Run with: cargo run --example support_desk

use retrace::builder::ChainBuilder;
use retrace::pipeline::{FnHandler, Outcome, Verdict};

struct Ticket {
    level: u8,
    description: &'static str,
}

fn tier(level: u8) -> FnHandler<Ticket, String> {
    FnHandler::new(format!("tier-{level}"), move |ticket: &Ticket| {
        if ticket.level == level {
            Ok(Verdict::Handled(format!(
                "L{level} resolved: {}",
                ticket.description
            )))
        } else {
            Ok(Verdict::Pass)
        }
    })
}

fn main() {
    println!("=== Support Desk Example ===\n");

    let mut chain = ChainBuilder::new()
        .handler(tier(1))
        .handler(tier(2))
        .handler(tier(3))
        .build()
        .unwrap();

    let tickets = [
        Ticket {
            level: 1,
            description: "password reset",
        },
        Ticket {
            level: 3,
            description: "data corruption",
        },
        Ticket {
            level: 9,
            description: "alien interference",
        },
    ];

    for ticket in &tickets {
        match chain.dispatch(ticket).unwrap() {
            Outcome::Handled { handler, response } => {
                println!("[{handler}] {response}");
            }
            Outcome::Unhandled => {
                println!("No tier could handle: {}", ticket.description);
            }
        }
    }

    println!("\n=== Example Complete ===");
}
