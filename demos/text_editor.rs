//! Text Editor with Undo/Redo
//!
//! This example demonstrates the history engine driving a tiny text
//! buffer.
//!
//! Key concepts:
//! - Reversible commands with a parameterized inverse
//! - Linear undo/redo over two stacks
//! - Branch discarding: a new edit after an undo forgets the redo branch
//!
//! Run with: cargo run --example text_editor

use retrace::core::FnCommand;
use retrace::history::History;

fn append(text: &str) -> FnCommand<String> {
    let owned = text.to_string();
    let len = text.len();
    FnCommand::infallible(
        format!("append {text:?}"),
        move |buffer: &mut String| buffer.push_str(&owned),
        move |buffer: &mut String| {
            let keep = buffer.len() - len;
            buffer.truncate(keep);
        },
    )
}

fn main() {
    println!("=== Text Editor Example ===\n");

    let mut buffer = String::new();
    let mut history = History::new();

    history.execute(append("Hello "), &mut buffer).unwrap();
    println!("Text: {buffer:?}");

    history.execute(append("World!"), &mut buffer).unwrap();
    println!("Text: {buffer:?}");

    history.undo(&mut buffer).unwrap();
    println!("Text after undo: {buffer:?}");

    history.redo(&mut buffer).unwrap();
    println!("Text after redo: {buffer:?}");

    // Diverge: undo, then type something new. The redo branch is gone.
    history.undo(&mut buffer).unwrap();
    history.execute(append("Rust!"), &mut buffer).unwrap();
    println!("Text after divergent edit: {buffer:?}");
    println!("Can redo: {}", history.can_redo());

    println!("\nJournal:");
    for record in history.journal().records() {
        println!("  {:?} {}", record.action, record.command);
    }

    println!("\n=== Example Complete ===");
}
