//! Gaussian crossing-flux kernel.
//!
//! All Volterra recursions in the density crate evaluate, for a Gaussian
//! transition with displacement `x` and accumulated variance `v`, the
//! product
//!
//! ```text
//! exp(−x² / 2v) · (slope − rate · x / v)
//! ```
//!
//! where `slope` is the boundary derivative minus the effective drift and
//! `rate` the instantaneous variance at the crossing time. Multiplied by
//! `1/√(2πv)` this is the probability flux through a moving boundary.

use fpt_core::Real;

/// Evaluate `exp(−½ x² · inv_var) · (slope − rate · x · inv_var)`.
///
/// Takes the *inverse* variance so that callers can hoist the division out
/// of their inner loops.
#[inline]
pub fn crossing_flux(x: Real, inv_var: Real, slope: Real, rate: Real) -> Real {
    let scaled = x * inv_var;
    (-0.5 * x * scaled).exp() * (slope - rate * scaled)
}
