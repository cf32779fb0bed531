//! Numerical constants.

use fpt_core::Real;
use std::f64::consts::PI;

/// Absolute accuracy to which the series expansions are summed.
pub const SERIES_ACC: Real = 1e-29;

/// Hard cap on the number of terms added by one series evaluation.
pub const MAX_SERIES_TERMS: usize = 10_000;

/// `2π`
pub const TWO_PI: Real = 2.0 * PI;

/// `π²`
pub const PI_SQR: Real = PI * PI;

/// `1 / √(2π)`
pub const INV_SQRT_2PI: Real = 0.398_942_280_401_432_7;
