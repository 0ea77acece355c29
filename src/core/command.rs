//! The reversible command contract.
//!
//! A command is a reified mutation of some target: it knows how to apply
//! itself and how to undo its own effect. Commands capture everything they
//! need (parameters or snapshots) so that re-applying them later has the
//! same observable effect as the original application.

use std::fmt;
use thiserror::Error;

/// Reason a target refused a mutation.
///
/// Commands return a `Rejection` when the target cannot accept the
/// requested change. The history engine surfaces it to the caller and
/// leaves its stacks untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct Rejection(pub String);

impl Rejection {
    /// Create a rejection from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Rejection(message.into())
    }
}

impl From<&str> for Rejection {
    fn from(message: &str) -> Self {
        Rejection(message.to_string())
    }
}

/// Trait for reversible mutations of a target `T`.
///
/// The contract: `invert` applied immediately after `apply` restores the
/// target to state equivalence with its prior observable state, and
/// `apply` called again after `invert` (a redo) has the same observable
/// effect as the original application. Both operations are synchronous
/// and may be rejected by the target.
///
/// # Required Traits
///
/// - `Send`: commands are owned by the history engine once submitted, and
///   the engine must be shareable behind a lock
///
/// # Example
///
/// ```rust
/// use retrace::core::{Command, Rejection};
///
/// struct Deposit {
///     amount: i64,
/// }
///
/// impl Command<i64> for Deposit {
///     fn name(&self) -> &str {
///         "deposit"
///     }
///
///     fn apply(&mut self, balance: &mut i64) -> Result<(), Rejection> {
///         *balance += self.amount;
///         Ok(())
///     }
///
///     fn invert(&mut self, balance: &mut i64) -> Result<(), Rejection> {
///         if *balance < self.amount {
///             return Err(Rejection::new("balance would go negative"));
///         }
///         *balance -= self.amount;
///         Ok(())
///     }
/// }
///
/// let mut balance = 0i64;
/// let mut deposit = Deposit { amount: 50 };
/// deposit.apply(&mut balance).unwrap();
/// assert_eq!(balance, 50);
/// deposit.invert(&mut balance).unwrap();
/// assert_eq!(balance, 0);
/// ```
pub trait Command<T>: Send {
    /// Human-readable command name for diagnostics and journaling.
    fn name(&self) -> &str;

    /// Apply the mutation to the target.
    ///
    /// Called once on submission and again on every redo. Must have the
    /// same observable effect each time.
    fn apply(&mut self, target: &mut T) -> Result<(), Rejection>;

    /// Reverse the mutation, restoring the target's prior observable state.
    fn invert(&mut self, target: &mut T) -> Result<(), Rejection>;
}

/// Closure-backed command: the "parameterized inverse" implementation of
/// the [`Command`] contract.
///
/// `FnCommand` stores a forward and a reverse closure. Use it when the
/// inverse is cheap to recompute from the command's parameters (append N
/// characters / remove N characters). When the inverse is hard to express,
/// reach for [`crate::memento::SnapshotCommand`] instead, which trades
/// memory for a wholesale state restore.
///
/// # Example
///
/// ```rust
/// use retrace::core::{Command, FnCommand};
///
/// let mut text = String::new();
/// let mut append = FnCommand::infallible(
///     "append world",
///     |s: &mut String| s.push_str("world"),
///     |s: &mut String| {
///         let keep = s.len() - 5;
///         s.truncate(keep);
///     },
/// );
///
/// append.apply(&mut text).unwrap();
/// assert_eq!(text, "world");
/// append.invert(&mut text).unwrap();
/// assert_eq!(text, "");
/// ```
pub struct FnCommand<T> {
    name: String,
    apply: Box<dyn FnMut(&mut T) -> Result<(), Rejection> + Send>,
    invert: Box<dyn FnMut(&mut T) -> Result<(), Rejection> + Send>,
}

impl<T> FnCommand<T> {
    /// Create a command from fallible forward and reverse closures.
    pub fn new<A, I>(name: impl Into<String>, apply: A, invert: I) -> Self
    where
        A: FnMut(&mut T) -> Result<(), Rejection> + Send + 'static,
        I: FnMut(&mut T) -> Result<(), Rejection> + Send + 'static,
    {
        FnCommand {
            name: name.into(),
            apply: Box::new(apply),
            invert: Box::new(invert),
        }
    }

    /// Create a command from closures that cannot fail.
    pub fn infallible<A, I>(name: impl Into<String>, mut apply: A, mut invert: I) -> Self
    where
        A: FnMut(&mut T) + Send + 'static,
        I: FnMut(&mut T) + Send + 'static,
    {
        Self::new(
            name,
            move |target: &mut T| {
                apply(target);
                Ok(())
            },
            move |target: &mut T| {
                invert(target);
                Ok(())
            },
        )
    }
}

impl<T> Command<T> for FnCommand<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&mut self, target: &mut T) -> Result<(), Rejection> {
        (self.apply)(target)
    }

    fn invert(&mut self, target: &mut T) -> Result<(), Rejection> {
        (self.invert)(target)
    }
}

impl<T> fmt::Debug for FnCommand<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommand").field("name", &self.name).finish()
    }
}
