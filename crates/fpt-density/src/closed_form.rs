//! Closed-form densities for constant drift and constant boundaries.
//!
//! A process with drift `μ`, unit variance, and flat boundaries
//! `b_lo < 0 < b_up` is mapped onto the standard process between `{0, 1}`
//! by the shift/scale `x → (x − b_lo)/(b_up − b_lo)` and a Girsanov factor
//! for the drift:
//!
//! ```text
//! g_lo(t) = exp(μ·b_lo − μ²t/2) / a² · f(t/a² | w)
//! g_up(t) = exp(μ·b_up − μ²t/2) / a² · f(t/a² | 1 − w)
//! ```
//!
//! with `a = b_up − b_lo`, `w = −b_lo / a`, and `f` the standard lower
//! density of [`fpt_math::series`]. The upper density uses the reflected
//! start point `1 − w`. For symmetric bounds `±b` the midpoint series
//! applies and `g_lo = exp(−2μb)·g_up`. Every grid time is independent, so
//! no scratch memory is needed.

use crate::schedule::{check_step, output_len};
use fpt_core::{ensure, errors::Result, Density, Real, Time};
use fpt_math::series::{fast_series_with, sym_fast_series_with, SeriesControl};

/// Upper density at `t` for symmetric bounds.
///
/// `c1 = 4·bound²`, `c2 = μ²/2`, `c3 = μ·bound`. The lower density is
/// `exp(−2·c3)` times this value.
fn sym_upper(t: Time, c1: Real, c2: Real, c3: Real, control: &SeriesControl) -> Density {
    (c3 - c2 * t).exp() / c1 * sym_fast_series_with(t / c1, control).value
}

/// Upper density at `t` for asymmetric bounds.
///
/// `c1 = (b_up − b_lo)²`, `c2 = μ²/2`, `c3 = μ·b_up`, `w = −b_lo/(b_up − b_lo)`.
fn asym_upper(
    t: Time,
    c1: Real,
    c2: Real,
    c3: Real,
    w: Real,
    control: &SeriesControl,
) -> Density {
    (c3 - c2 * t).exp() / c1 * fast_series_with(t / c1, 1.0 - w, control).value
}

/// Lower density at `t` for asymmetric bounds; `c4 = μ·b_lo`, the rest as
/// for [`asym_upper`].
fn asym_lower(
    t: Time,
    c1: Real,
    c2: Real,
    c4: Real,
    w: Real,
    control: &SeriesControl,
) -> Density {
    (c4 - c2 * t).exp() / c1 * fast_series_with(t / c1, w, control).value
}

/// Scaled constants shared by the asymmetric densities.
struct AsymConstants {
    c1: Real,
    c2: Real,
    c3: Real,
    c4: Real,
    w: Real,
}

impl AsymConstants {
    fn new(mu: Real, upper: Real, lower: Real) -> Result<Self> {
        ensure!(mu > 0.0 && mu.is_finite(), "drift must be positive, got {mu}");
        ensure!(
            lower < 0.0 && upper > 0.0 && upper.is_finite() && lower.is_finite(),
            "bounds must satisfy lower < 0 < upper, got [{lower}, {upper}]"
        );
        let width = upper - lower;
        Ok(Self {
            c1: width * width,
            c2: mu * mu / 2.0,
            c3: mu * upper,
            c4: mu * lower,
            w: -lower / width,
        })
    }
}

pub(crate) fn const_bound_density(
    mu: Real,
    bound: Real,
    delta_t: Time,
    control: &SeriesControl,
    g1: &mut [Density],
    g2: &mut [Density],
) -> Result<()> {
    let k_max = output_len(g1, g2)?;
    check_step(delta_t)?;
    ensure!(mu > 0.0 && mu.is_finite(), "drift must be positive, got {mu}");
    ensure!(bound > 0.0 && bound.is_finite(), "bound must be positive, got {bound}");
    tracing::debug!(k_max, delta_t, mu, bound, "closed-form symmetric density");

    let c1 = 4.0 * bound * bound;
    let c2 = mu * mu / 2.0;
    let c3 = mu * bound;
    let c4 = (-2.0 * c3).exp();
    for (i, (up, lo)) in g1.iter_mut().zip(g2.iter_mut()).enumerate() {
        let t = (i + 1) as Real * delta_t;
        let g = sym_upper(t, c1, c2, c3, control);
        *up = g.max(0.0);
        *lo = (c4 * g).max(0.0);
    }
    Ok(())
}

pub(crate) fn asym_bound_density(
    mu: Real,
    upper: Real,
    lower: Real,
    delta_t: Time,
    control: &SeriesControl,
    g1: &mut [Density],
    g2: &mut [Density],
) -> Result<()> {
    let k_max = output_len(g1, g2)?;
    check_step(delta_t)?;
    let c = AsymConstants::new(mu, upper, lower)?;
    tracing::debug!(k_max, delta_t, mu, upper, lower, "closed-form asymmetric density");

    for (i, (up, lo)) in g1.iter_mut().zip(g2.iter_mut()).enumerate() {
        let t = (i + 1) as Real * delta_t;
        *up = asym_upper(t, c.c1, c.c2, c.c3, c.w, control).max(0.0);
        *lo = asym_lower(t, c.c1, c.c2, c.c4, c.w, control).max(0.0);
    }
    Ok(())
}

pub(crate) fn asym_upper_density(
    mu: Real,
    upper: Real,
    lower: Real,
    delta_t: Time,
    control: &SeriesControl,
    g1: &mut [Density],
) -> Result<()> {
    ensure!(!g1.is_empty(), "density buffer must hold at least one step");
    check_step(delta_t)?;
    let c = AsymConstants::new(mu, upper, lower)?;
    for (i, up) in g1.iter_mut().enumerate() {
        let t = (i + 1) as Real * delta_t;
        *up = asym_upper(t, c.c1, c.c2, c.c3, c.w, control).max(0.0);
    }
    Ok(())
}

pub(crate) fn asym_lower_density(
    mu: Real,
    upper: Real,
    lower: Real,
    delta_t: Time,
    control: &SeriesControl,
    g2: &mut [Density],
) -> Result<()> {
    ensure!(!g2.is_empty(), "density buffer must hold at least one step");
    check_step(delta_t)?;
    let c = AsymConstants::new(mu, upper, lower)?;
    for (i, lo) in g2.iter_mut().enumerate() {
        let t = (i + 1) as Real * delta_t;
        *lo = asym_lower(t, c.c1, c.c2, c.c4, c.w, control).max(0.0);
    }
    Ok(())
}
