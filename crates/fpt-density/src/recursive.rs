//! General first-passage recursion for time-varying drift, variance, and
//! curved boundaries.
//!
//! The densities `g1` (upper) and `g2` (lower) solve the coupled Volterra
//! equations
//!
//! ```text
//! g1(t) = −ψ(b_up, t | 0, 0) + ∫₀ᵗ [g1(τ) ψ(b_up, t | b_up(τ), τ) + g2(τ) ψ(b_up, t | b_lo(τ), τ)] dτ
//! g2(t) =  ψ(b_lo, t | 0, 0) − ∫₀ᵗ [g1(τ) ψ(b_lo, t | b_up(τ), τ) + g2(τ) ψ(b_lo, t | b_lo(τ), τ)] dτ
//! ```
//!
//! with the Gaussian flux kernel
//!
//! ```text
//! ψ(b, t | y, τ) = φ(x; V) · (b'(t) − μ(t) − σ²(t) · x / V),   x = b(t) − y − M,
//! ```
//!
//! where `M` and `V` are the drift and variance accumulated over `[τ, t]`.
//! The integrals are discretised on the step grid; step `k` depends only
//! on steps `j < k`, so the densities are filled in increasing order.
//!
//! With a leak rate `λ` the accumulated drift and variance are discounted
//! (`M(t) = e^{−λΔt} M(t − Δt) + μΔt`, `V(t) = e^{−2λΔt} V(t − Δt) + σ²Δt`),
//! the start point of a residual path is discounted by `e^{−λ(t−τ)}`, and
//! the boundary slope gains the mean-reversion term `λ·b(t)`.

use crate::schedule::{output_len, DiffusionSchedule};
use fpt_core::{ensure, errors::Result, Density, Real, Scratch};
use fpt_math::constants::INV_SQRT_2PI;
use fpt_math::crossing_flux;

/// Discounting of earlier steps as seen from a later one.
trait Leak {
    /// Leak rate `λ` (inverse time constant).
    fn rate(&self) -> Real;
    /// `e^{−λΔt(lag + 1)}`
    fn discount(&self, lag: usize) -> Real;
    /// `e^{−2λΔt(lag + 1)}`
    fn discount2(&self, lag: usize) -> Real;
}

struct NoLeak;

impl Leak for NoLeak {
    #[inline]
    fn rate(&self) -> Real {
        0.0
    }

    #[inline]
    fn discount(&self, _lag: usize) -> Real {
        1.0
    }

    #[inline]
    fn discount2(&self, _lag: usize) -> Real {
        1.0
    }
}

/// Precomputed one- and two-step discount factors.
struct LeakDiscounts {
    rate: Real,
    one_step: Vec<Real>,
    two_step: Vec<Real>,
}

impl LeakDiscounts {
    fn build(rate: Real, delta_t: Real, k_max: usize, scratch: &mut Scratch) -> Result<Self> {
        let mut one_step = scratch.allocate(k_max)?;
        let mut two_step = scratch.allocate(k_max)?;
        let exp_leak = (-delta_t * rate).exp();
        let exp2_leak = (-2.0 * delta_t * rate).exp();

        let mut curr = exp_leak;
        for d in one_step.iter_mut() {
            *d = curr;
            curr *= exp_leak;
        }

        // e^{−2λΔt(j+1)} = one_step[2j + 1] while that index exists;
        // the tail continues by repeated multiplication.
        let reused = k_max / 2;
        for j in 0..reused {
            two_step[j] = one_step[2 * j + 1];
        }
        let mut curr = if reused > 0 { two_step[reused - 1] } else { 1.0 };
        for d in two_step[reused..].iter_mut() {
            curr *= exp2_leak;
            *d = curr;
        }

        Ok(Self {
            rate,
            one_step,
            two_step,
        })
    }
}

impl Leak for LeakDiscounts {
    #[inline]
    fn rate(&self) -> Real {
        self.rate
    }

    #[inline]
    fn discount(&self, lag: usize) -> Real {
        self.one_step[lag]
    }

    #[inline]
    fn discount2(&self, lag: usize) -> Real {
        self.two_step[lag]
    }
}

/// Cumulative (possibly leak-discounted) drift and variance integrals.
struct CumulativeStats {
    drift: Vec<Real>,
    variance: Vec<Real>,
}

impl CumulativeStats {
    fn build(
        schedule: &DiffusionSchedule<'_>,
        k_max: usize,
        decay: Real,
        scratch: &mut Scratch,
    ) -> Result<Self> {
        let mut drift = scratch.allocate(k_max)?;
        let mut variance = scratch.allocate(k_max)?;
        let dt = schedule.delta_t;
        let decay2 = decay * decay;
        let (mut cum_mu, mut cum_sig2) = (0.0, 0.0);
        for k in 0..k_max {
            cum_mu = decay * cum_mu + dt * schedule.drift[k];
            cum_sig2 = decay2 * cum_sig2 + dt * schedule.variance[k];
            drift[k] = cum_mu;
            variance[k] = cum_sig2;
        }
        Ok(Self { drift, variance })
    }
}

/// Solve the recursion without leak.
pub(crate) fn solve(
    schedule: &DiffusionSchedule<'_>,
    scratch: &mut Scratch,
    g1: &mut [Density],
    g2: &mut [Density],
) -> Result<()> {
    let k_max = output_len(g1, g2)?;
    schedule.validate(k_max)?;
    tracing::debug!(k_max, delta_t = schedule.delta_t, "general recursion");

    let stats = CumulativeStats::build(schedule, k_max, 1.0, scratch)?;
    let clamped = fill_densities(schedule, &stats, &NoLeak, g1, g2);
    tracing::debug!(clamped_upper = clamped.0, clamped_lower = clamped.1, "general recursion done");
    Ok(())
}

/// Solve the recursion with leak rate `inv_leak`.
pub(crate) fn solve_leak(
    schedule: &DiffusionSchedule<'_>,
    inv_leak: Real,
    scratch: &mut Scratch,
    g1: &mut [Density],
    g2: &mut [Density],
) -> Result<()> {
    let k_max = output_len(g1, g2)?;
    schedule.validate(k_max)?;
    ensure!(
        inv_leak >= 0.0 && inv_leak.is_finite(),
        "leak rate must be non-negative and finite, got {inv_leak}"
    );
    tracing::debug!(k_max, delta_t = schedule.delta_t, inv_leak, "leaky recursion");

    let decay = (-schedule.delta_t * inv_leak).exp();
    let stats = CumulativeStats::build(schedule, k_max, decay, scratch)?;
    let leak = LeakDiscounts::build(inv_leak, schedule.delta_t, k_max, scratch)?;
    let clamped = fill_densities(schedule, &stats, &leak, g1, g2);
    tracing::debug!(clamped_upper = clamped.0, clamped_lower = clamped.1, "leaky recursion done");
    Ok(())
}

/// Fill `g1`/`g2` step by step; returns how many values were clamped to 0.
fn fill_densities<L: Leak>(
    schedule: &DiffusionSchedule<'_>,
    stats: &CumulativeStats,
    leak: &L,
    g1: &mut [Density],
    g2: &mut [Density],
) -> (usize, usize) {
    let k_max = g1.len();
    let dt_norm = schedule.delta_t * INV_SQRT_2PI;
    let (b_up, b_lo) = (schedule.upper, schedule.lower);
    let mut clamped = (0, 0);

    for k in 0..k_max {
        let sig2_k = schedule.variance[k];
        let b_up_k = b_up[k];
        let b_lo_k = b_lo[k];
        let cum_mu_k = stats.drift[k];
        let inv_var_k = 1.0 / stats.variance[k];
        let up_slope = schedule.upper_deriv[k] + leak.rate() * b_up_k - schedule.drift[k];
        let lo_slope = schedule.lower_deriv[k] + leak.rate() * b_lo_k - schedule.drift[k];

        // direct transition from the start point
        let norm_k = INV_SQRT_2PI * inv_var_k.sqrt();
        let mut g1_k = -norm_k * crossing_flux(b_up_k - cum_mu_k, inv_var_k, up_slope, sig2_k);
        let mut g2_k = norm_k * crossing_flux(b_lo_k - cum_mu_k, inv_var_k, lo_slope, sig2_k);

        // paths that already touched a boundary at an earlier step
        for j in 0..k {
            let lag = k - j - 1;
            let disc = leak.discount(lag);
            let inv_var = 1.0 / (stats.variance[k] - leak.discount2(lag) * stats.variance[j]);
            let norm = dt_norm * inv_var.sqrt();
            let mu_diff = disc * stats.drift[j] - cum_mu_k;
            let up_from_up = b_up_k - disc * b_up[j] + mu_diff;
            let up_from_lo = b_up_k - disc * b_lo[j] + mu_diff;
            let lo_from_up = b_lo_k - disc * b_up[j] + mu_diff;
            let lo_from_lo = b_lo_k - disc * b_lo[j] + mu_diff;

            g1_k += norm
                * (g1[j] * crossing_flux(up_from_up, inv_var, up_slope, sig2_k)
                    + g2[j] * crossing_flux(up_from_lo, inv_var, up_slope, sig2_k));
            g2_k -= norm
                * (g1[j] * crossing_flux(lo_from_up, inv_var, lo_slope, sig2_k)
                    + g2[j] * crossing_flux(lo_from_lo, inv_var, lo_slope, sig2_k));
        }

        // cancellation can leave small negative values
        clamped.0 += usize::from(g1_k < 0.0);
        clamped.1 += usize::from(g2_k < 0.0);
        g1[k] = g1_k.max(0.0);
        g2[k] = g2_k.max(0.0);
    }
    clamped
}
