//! Shared vocabulary for the history engine.
//!
//! This module contains the types both the engine and its callers speak:
//! - The reversible [`Command`] contract and its closure-backed
//!   implementation [`FnCommand`]
//! - [`Rejection`], the typed reason a target refuses a mutation
//! - The diagnostic [`Journal`] of engine activity

mod command;
mod journal;

pub use command::{Command, FnCommand, Rejection};
pub use journal::{Action, Journal, Record};
