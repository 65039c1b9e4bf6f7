//! Utility macros used across the crate.

/// Returns early with an error if a condition is not met.
///
/// Similar to `assert!`, but returns `Err($error)` instead of panicking.
///
/// # Example
///
/// ```ignore
/// ensure!(line.len() <= max_line_bytes, ParseError::too_large_line(line.len(), max_line_bytes));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error.into());
        }
    };
}

pub(crate) use ensure;
