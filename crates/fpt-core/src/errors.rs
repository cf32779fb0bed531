//! Error types for ddmfpt.
//!
//! Two classes of failure exist: a violated precondition (bad step size,
//! short schedule, wrong output length), which is reported before any
//! output is written, and scratch exhaustion, which is reported after every
//! already-acquired scratch buffer has been released.

use thiserror::Error;

/// The top-level error type used throughout ddmfpt.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated by the caller.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// A sequence does not have the length the call requires.
    #[error("{name}: expected length {expected}, found {found}")]
    LengthMismatch {
        /// Name of the offending sequence.
        name: &'static str,
        /// Required length (a minimum for input schedules).
        expected: usize,
        /// Length actually supplied.
        found: usize,
    },

    /// A scratch buffer could not be allocated.
    #[error("failed to allocate scratch buffer of {requested} elements")]
    Allocation {
        /// Number of elements requested by the failing allocation.
        requested: usize,
    },
}

impl Error {
    /// Whether the error may disappear on retry once memory is available.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Allocation { .. })
    }
}

/// Shorthand `Result` type used throughout ddmfpt.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use fpt_core::{ensure, errors::Error};
/// fn positive(x: f64) -> fpt_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use fpt_core::{fail, errors::Error};
/// fn always_err() -> fpt_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

/// Check that a sequence holds at least `$min` elements.
///
/// Returns `Err(Error::LengthMismatch { .. })` naming the sequence otherwise.
///
/// # Example
/// ```
/// use fpt_core::{ensure_len, errors::Error};
/// fn head(v: &[f64], n: usize) -> fpt_core::errors::Result<f64> {
///     ensure_len!(v, n);
///     Ok(v[..n].iter().sum())
/// }
/// assert!(head(&[1.0, 2.0], 2).is_ok());
/// assert!(matches!(head(&[1.0], 2), Err(Error::LengthMismatch { .. })));
/// ```
#[macro_export]
macro_rules! ensure_len {
    ($seq:expr, $min:expr) => {
        if $seq.len() < $min {
            return Err($crate::errors::Error::LengthMismatch {
                name: stringify!($seq),
                expected: $min,
                found: $seq.len(),
            });
        }
    };
}
