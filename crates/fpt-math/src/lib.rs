//! # fpt-math
//!
//! Numerical building blocks for first-passage time densities: named
//! constants, the Gaussian crossing-flux kernel shared by the Volterra
//! recursions, and the short/long-time series expansions of Navarro &
//! Fuss (2009).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Named numerical constants.
pub mod constants;

/// Gaussian transition kernel.
pub mod kernel;

/// Short/long-time series for the standard two-boundary process.
pub mod series;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use constants::{MAX_SERIES_TERMS, SERIES_ACC};
pub use kernel::crossing_flux;
pub use series::{
    choose_series, fast_series, long_time_series, short_time_series, sym_fast_series,
    sym_series, SeriesControl, SeriesKind, SeriesSum,
};
