//! Recursion for the weighted-input formulation.
//!
//! The process accumulates evidence with drift `w·a(t)²` and variance
//! `a(t)²`, so the natural clock is the accumulated squared drift
//! `A(t) = ∫₀ᵗ a(s)² ds` rather than elapsed time. Boundaries are `±b(t)`.
//! As for any symmetric-bound process whose drift is proportional to its
//! variance, the lower density is the upper one scaled by `exp(−2w·b(t))`,
//! so only the upper recursion is solved.

use crate::schedule::{check_step, fill_boundary_derivative, output_len};
use fpt_core::{ensure, ensure_len, errors::Result, Density, Real, Scratch, Time};
use fpt_math::constants::INV_SQRT_2PI;
use fpt_math::crossing_flux;

pub(crate) fn solve_weighted(
    drift: &[Real],
    bound: &[Real],
    weight: Real,
    delta_t: Time,
    scratch: &mut Scratch,
    g1: &mut [Density],
    g2: &mut [Density],
) -> Result<()> {
    let n_max = output_len(g1, g2)?;
    check_step(delta_t)?;
    ensure!(weight.is_finite(), "weight must be finite, got {weight}");
    ensure_len!(drift, n_max);
    ensure_len!(bound, n_max);
    tracing::debug!(n_max, delta_t, weight, "weighted recursion");

    let mut a2 = scratch.allocate(n_max)?;
    let mut cum_a2 = scratch.allocate(n_max)?;
    let mut bound_deriv = scratch.allocate(n_max)?;

    let mut curr = 0.0;
    for j in 0..n_max {
        a2[j] = drift[j] * drift[j];
        curr += delta_t * a2[j];
        cum_a2[j] = curr;
    }
    fill_boundary_derivative(bound, delta_t, &mut bound_deriv);

    let dt_norm = delta_t * INV_SQRT_2PI;
    let mut clamped = 0usize;
    for n in 0..n_max {
        let bound_n = bound[n];
        let a2_n = a2[n];
        let big_a_n = cum_a2[n];
        // drift w·a² folded into the slope, so the flux term reduces to
        // b'(t) − a²·b / A
        let slope = bound_deriv[n] - weight * a2_n;

        let inv_a_n = 1.0 / big_a_n;
        let mut g1_n = -INV_SQRT_2PI
            * inv_a_n.sqrt()
            * crossing_flux(bound_n - weight * big_a_n, inv_a_n, slope, a2_n);

        for j in 0..n {
            let bound_j = bound[j];
            let a_diff = big_a_n - cum_a2[j];
            let inv_a = 1.0 / a_diff;
            let from_up = bound_n - bound_j - weight * a_diff;
            let from_lo = bound_n + bound_j - weight * a_diff;
            g1_n += dt_norm
                * inv_a.sqrt()
                * (g1[j] * crossing_flux(from_up, inv_a, slope, a2_n)
                    + g2[j] * crossing_flux(from_lo, inv_a, slope, a2_n));
        }

        clamped += usize::from(g1_n < 0.0);
        g1[n] = g1_n.max(0.0);
        g2[n] = (g1_n * (-2.0 * weight * bound_n).exp()).max(0.0);
    }
    tracing::debug!(clamped, "weighted recursion done");
    Ok(())
}
