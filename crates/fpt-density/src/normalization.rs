//! Mass normalisation of a computed density pair.

use crate::schedule::{check_step, output_len};
use fpt_core::{errors::Result, fail, Density, Real, Time};

/// Make `(Σg1 + Σg2)·Δt == 1` while keeping both sequences non-negative.
///
/// Negative (or NaN) elements are zeroed first. The upper share
/// `p = Σg1 / (Σg1 + Σg2)` of the remaining mass is preserved: the missing
/// mass `p/Δt − Σg1` is added to the last element of `g1` and
/// `(1 − p)/Δt − Σg2` to the last element of `g2`, which stands for "no
/// decision within the grid". If the densities already carry more than
/// unit mass and the last element cannot absorb the excess, the whole
/// sequence is scaled down instead.
///
/// Fails with [`Error::Runtime`](fpt_core::Error::Runtime) when the
/// non-negative mass is zero or not finite. Both slices are then left
/// exactly as they were.
///
/// # Example
/// ```
/// use fpt_density::normalize_mass;
/// let mut g1 = vec![1.0, 2.0, 1.0];
/// let mut g2 = vec![0.5, -0.1, 0.5];
/// normalize_mass(&mut g1, &mut g2, 0.1).unwrap();
/// let total: f64 = g1.iter().chain(&g2).sum::<f64>() * 0.1;
/// assert!((total - 1.0).abs() < 1e-12);
/// assert!(g2.iter().all(|&x| x >= 0.0));
/// ```
pub fn normalize_mass(g1: &mut [Density], g2: &mut [Density], delta_t: Time) -> Result<()> {
    let n = output_len(g1, g2)?;
    check_step(delta_t)?;

    let g1_sum = positive_mass(g1);
    let g2_sum = positive_mass(g2);
    let total = g1_sum + g2_sum;
    if !(total > 0.0 && total.is_finite()) {
        fail!("densities carry no finite mass to normalise (sum = {total})");
    }
    clamp_negative(g1);
    clamp_negative(g2);

    let p = g1_sum / total;
    adjust_tail(g1, g1_sum, p / delta_t, n);
    adjust_tail(g2, g2_sum, (1.0 - p) / delta_t, n);
    tracing::debug!(upper_share = p, mass_before = total * delta_t, "normalised densities");
    Ok(())
}

fn positive_mass(g: &[Density]) -> Real {
    g.iter().filter(|&&x| x >= 0.0).sum()
}

// NaN fails the comparison and is zeroed along with the negatives.
fn clamp_negative(g: &mut [Density]) {
    g.iter_mut().filter(|x| !(**x >= 0.0)).for_each(|x| *x = 0.0);
}

fn adjust_tail(g: &mut [Density], sum: Real, target: Real, n: usize) {
    let missing = target - sum;
    if g[n - 1] + missing >= 0.0 {
        g[n - 1] += missing;
    } else {
        let scale = target / sum;
        g.iter_mut().for_each(|x| *x *= scale);
    }
}
