//! Macros for ergonomic command construction.

/// Build a closure-backed command inline.
///
/// Expands to [`crate::core::FnCommand::new`] with the forward and
/// reverse closures labeled at the call site.
///
/// # Example
///
/// ```
/// use retrace::command;
/// use retrace::history::History;
///
/// let mut counter = 0i32;
/// let mut history = History::new();
///
/// history.execute(
///     command!(
///         "increment",
///         apply: |n: &mut i32| { *n += 1; Ok(()) },
///         invert: |n: &mut i32| { *n -= 1; Ok(()) },
///     ),
///     &mut counter,
/// ).unwrap();
///
/// assert_eq!(counter, 1);
/// history.undo(&mut counter).unwrap();
/// assert_eq!(counter, 0);
/// ```
#[macro_export]
macro_rules! command {
    (
        $name:expr,
        apply: $apply:expr,
        invert: $invert:expr $(,)?
    ) => {
        $crate::core::FnCommand::new($name, $apply, $invert)
    };
}
