//! Recursions for unit-variance processes between symmetric, time-varying
//! boundaries `±b(t)`.
//!
//! With unit variance the accumulated variance over `m` steps is just
//! `mΔt`, so the normalisers `1/√(2πmΔt)` and `1/(mΔt)` are tabulated once
//! and the inner loop does no square roots. Boundary derivatives come from
//! forward differences of the bound schedule.

use crate::schedule::{check_step, fill_boundary_derivative, output_len};
use fpt_core::{ensure, ensure_len, errors::Result, Density, Real, Scratch, Time};
use fpt_math::constants::TWO_PI;
use fpt_math::crossing_flux;

/// `1/√(2πΔt(i+1))` and `1/(Δt(i+1))` for every lag `i`.
struct TimeNorms {
    sqrt_t: Vec<Real>,
    t: Vec<Real>,
}

impl TimeNorms {
    fn build(delta_t: Time, k_max: usize, scratch: &mut Scratch) -> Result<Self> {
        let mut sqrt_t = scratch.allocate(k_max)?;
        let mut t = scratch.allocate(k_max)?;
        let two_pi_dt = TWO_PI * delta_t;
        for j in 0..k_max {
            let steps = (j + 1) as Real;
            sqrt_t[j] = 1.0 / (two_pi_dt * steps).sqrt();
            t[j] = 1.0 / (delta_t * steps);
        }
        Ok(Self { sqrt_t, t })
    }
}

/// Time-varying drift, bounds `±bound(t)`, both densities by full recursion.
pub(crate) fn solve_symmetric(
    drift: &[Real],
    bound: &[Real],
    delta_t: Time,
    scratch: &mut Scratch,
    g1: &mut [Density],
    g2: &mut [Density],
) -> Result<()> {
    let k_max = output_len(g1, g2)?;
    check_step(delta_t)?;
    ensure_len!(drift, k_max);
    ensure_len!(bound, k_max);
    tracing::debug!(k_max, delta_t, "symmetric-bound recursion");

    let mut cum_mu = scratch.allocate(k_max)?;
    let mut bound_deriv = scratch.allocate(k_max)?;
    let norms = TimeNorms::build(delta_t, k_max, scratch)?;

    let mut curr = 0.0;
    for (c, &mu) in cum_mu.iter_mut().zip(drift) {
        curr += delta_t * mu;
        *c = curr;
    }
    fill_boundary_derivative(bound, delta_t, &mut bound_deriv);

    let mut clamped = (0usize, 0usize);
    for k in 0..k_max {
        let bound_k = bound[k];
        let up_slope = bound_deriv[k] - drift[k];
        let lo_slope = -bound_deriv[k] - drift[k];
        let cum_mu_k = cum_mu[k];
        let (norm_k, inv_t_k) = (norms.sqrt_t[k], norms.t[k]);

        let mut g1_k = -norm_k * crossing_flux(bound_k - cum_mu_k, inv_t_k, up_slope, 1.0);
        let mut g2_k = norm_k * crossing_flux(-bound_k - cum_mu_k, inv_t_k, lo_slope, 1.0);

        for j in 0..k {
            let bound_j = bound[j];
            let drift_kj = cum_mu_k - cum_mu[j];
            let lag = k - j - 1;
            let (norm, inv_t) = (delta_t * norms.sqrt_t[lag], norms.t[lag]);

            let up_from_up = bound_k - bound_j - drift_kj;
            let up_from_lo = bound_k + bound_j - drift_kj;
            g1_k += norm
                * (g1[j] * crossing_flux(up_from_up, inv_t, up_slope, 1.0)
                    + g2[j] * crossing_flux(up_from_lo, inv_t, up_slope, 1.0));

            let lo_from_up = -bound_k - bound_j - drift_kj;
            let lo_from_lo = -bound_k + bound_j - drift_kj;
            g2_k -= norm
                * (g1[j] * crossing_flux(lo_from_up, inv_t, lo_slope, 1.0)
                    + g2[j] * crossing_flux(lo_from_lo, inv_t, lo_slope, 1.0));
        }

        clamped.0 += usize::from(g1_k < 0.0);
        clamped.1 += usize::from(g2_k < 0.0);
        g1[k] = g1_k.max(0.0);
        g2[k] = g2_k.max(0.0);
    }
    tracing::debug!(clamped_upper = clamped.0, clamped_lower = clamped.1, "symmetric-bound recursion done");
    Ok(())
}

/// Constant drift `mu > 0`, bounds `±bound(t)`.
///
/// Only the upper density is solved for; the lower one follows from the
/// reflection identity `g2(t) = g1(t) · exp(−2μ·b(t))`.
pub(crate) fn solve_const_drift(
    mu: Real,
    bound: &[Real],
    delta_t: Time,
    scratch: &mut Scratch,
    g1: &mut [Density],
    g2: &mut [Density],
) -> Result<()> {
    let k_max = output_len(g1, g2)?;
    check_step(delta_t)?;
    ensure!(mu > 0.0 && mu.is_finite(), "drift must be positive, got {mu}");
    ensure_len!(bound, k_max);
    tracing::debug!(k_max, delta_t, mu, "constant-drift recursion");

    let mut bound_deriv = scratch.allocate(k_max)?;
    let norms = TimeNorms::build(delta_t, k_max, scratch)?;
    fill_boundary_derivative(bound, delta_t, &mut bound_deriv);

    let mu_dt = mu * delta_t;
    let mut clamped = 0usize;
    for k in 0..k_max {
        let bound_k = bound[k];
        let up_slope = bound_deriv[k] - mu;
        let cum_mu_k = (k + 1) as Real * mu_dt;
        let (norm_k, inv_t_k) = (norms.sqrt_t[k], norms.t[k]);

        let mut g1_k = -norm_k * crossing_flux(bound_k - cum_mu_k, inv_t_k, up_slope, 1.0);
        for j in 0..k {
            let bound_j = bound[j];
            let drift_kj = (k - j) as Real * mu_dt;
            let lag = k - j - 1;
            let (norm, inv_t) = (delta_t * norms.sqrt_t[lag], norms.t[lag]);
            let up_from_up = bound_k - bound_j - drift_kj;
            let up_from_lo = bound_k + bound_j - drift_kj;
            g1_k += norm
                * (g1[j] * crossing_flux(up_from_up, inv_t, up_slope, 1.0)
                    + g2[j] * crossing_flux(up_from_lo, inv_t, up_slope, 1.0));
        }

        clamped += usize::from(g1_k < 0.0);
        g1[k] = g1_k.max(0.0);
        g2[k] = (g1_k * (-2.0 * mu * bound_k).exp()).max(0.0);
    }
    tracing::debug!(clamped, "constant-drift recursion done");
    Ok(())
}
