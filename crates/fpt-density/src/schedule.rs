//! Input schedules on the uniform time grid.
//!
//! Grid convention: element `k` of every schedule describes the step that
//! ends at time `(k + 1)·Δt`, and element `k` of the output densities is
//! the density at that time.

use fpt_core::{ensure, ensure_len, errors::Result, Real, Scratch, Time};

/// Borrowed drift, variance, and boundary schedules for the general
/// recursion.
///
/// The schedules must hold at least as many elements as the output
/// densities; extra trailing elements are ignored.
#[derive(Debug, Clone, Copy)]
pub struct DiffusionSchedule<'a> {
    /// Drift rate per step.
    pub drift: &'a [Real],
    /// Diffusion variance per step (must be positive).
    pub variance: &'a [Real],
    /// Lower boundary per step.
    pub lower: &'a [Real],
    /// Upper boundary per step.
    pub upper: &'a [Real],
    /// Time derivative of the lower boundary per step.
    pub lower_deriv: &'a [Real],
    /// Time derivative of the upper boundary per step.
    pub upper_deriv: &'a [Real],
    /// Step size in seconds.
    pub delta_t: Time,
}

impl<'a> DiffusionSchedule<'a> {
    /// Bundle the schedules.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        drift: &'a [Real],
        variance: &'a [Real],
        lower: &'a [Real],
        upper: &'a [Real],
        lower_deriv: &'a [Real],
        upper_deriv: &'a [Real],
        delta_t: Time,
    ) -> Self {
        Self {
            drift,
            variance,
            lower,
            upper,
            lower_deriv,
            upper_deriv,
            delta_t,
        }
    }

    /// Number of steps covered by every schedule.
    pub fn k_max(&self) -> usize {
        [
            self.drift.len(),
            self.variance.len(),
            self.lower.len(),
            self.upper.len(),
            self.lower_deriv.len(),
            self.upper_deriv.len(),
        ]
        .into_iter()
        .min()
        .unwrap_or(0)
    }

    /// Check the step size and that every schedule covers `k_max` steps.
    pub fn validate(&self, k_max: usize) -> Result<()> {
        check_step(self.delta_t)?;
        let Self {
            drift,
            variance,
            lower,
            upper,
            lower_deriv,
            upper_deriv,
            ..
        } = *self;
        ensure_len!(drift, k_max);
        ensure_len!(variance, k_max);
        ensure_len!(lower, k_max);
        ensure_len!(upper, k_max);
        ensure_len!(lower_deriv, k_max);
        ensure_len!(upper_deriv, k_max);
        Ok(())
    }
}

/// Forward-difference derivative of a boundary schedule.
///
/// `d[k] = (b[k+1] − b[k]) / Δt` for `k < n − 1`. The last point has no
/// right neighbour and reuses the derivative of the second-to-last point;
/// a single-point schedule is treated as flat.
///
/// # Example
/// ```
/// use fpt_density::boundary_derivative;
/// let d = boundary_derivative(&[1.0, 0.9, 0.7], 0.1).unwrap();
/// assert!((d[0] + 1.0).abs() < 1e-12);
/// assert!((d[1] + 2.0).abs() < 1e-12);
/// assert_eq!(d[2], d[1]);
/// ```
pub fn boundary_derivative(bound: &[Real], delta_t: Time) -> Result<Vec<Real>> {
    check_step(delta_t)?;
    let mut out = Scratch::unbounded().allocate(bound.len())?;
    fill_boundary_derivative(bound, delta_t, &mut out);
    Ok(out)
}

/// Write the forward-difference derivative of `bound[..out.len()]` into `out`.
pub(crate) fn fill_boundary_derivative(bound: &[Real], delta_t: Time, out: &mut [Real]) {
    let n = out.len();
    for j in 1..n {
        out[j - 1] = (bound[j] - bound[j - 1]) / delta_t;
    }
    if n >= 2 {
        out[n - 1] = out[n - 2];
    } else if n == 1 {
        out[0] = 0.0;
    }
}

pub(crate) fn check_step(delta_t: Time) -> Result<()> {
    ensure!(
        delta_t > 0.0 && delta_t.is_finite(),
        "step size must be positive and finite, got {delta_t}"
    );
    Ok(())
}

/// Check the two output buffers and return the step count they define.
pub(crate) fn output_len(g1: &[Real], g2: &[Real]) -> Result<usize> {
    ensure!(!g1.is_empty(), "density buffers must hold at least one step");
    if g2.len() != g1.len() {
        return Err(fpt_core::Error::LengthMismatch {
            name: "g2",
            expected: g1.len(),
            found: g2.len(),
        });
    }
    Ok(g1.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fpt_core::Error;

    #[test]
    fn derivative_of_linear_bound_is_constant() {
        let dt = 0.01;
        let b: Vec<Real> = (0..50).map(|k| 2.0 - 0.5 * (k + 1) as Real * dt).collect();
        let d = boundary_derivative(&b, dt).unwrap();
        for &x in &d {
            assert_abs_diff_eq!(x, -0.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn last_point_reuses_previous_derivative() {
        let d = boundary_derivative(&[0.0, 1.0, 4.0, 9.0], 1.0).unwrap();
        assert_eq!(d, vec![1.0, 3.0, 5.0, 5.0]);
    }

    #[test]
    fn single_point_is_flat() {
        assert_eq!(boundary_derivative(&[3.0], 0.1).unwrap(), vec![0.0]);
    }

    #[test]
    fn zero_step_rejected() {
        assert!(matches!(
            boundary_derivative(&[1.0, 1.0], 0.0),
            Err(Error::Precondition(_))
        ));
    }

    #[test]
    fn k_max_is_shortest_schedule() {
        let long = [0.0; 10];
        let short = [0.0; 4];
        let s = DiffusionSchedule::new(&long, &long, &long, &short, &long, &long, 0.1);
        assert_eq!(s.k_max(), 4);
        assert!(s.validate(4).is_ok());
        assert_eq!(
            s.validate(5).unwrap_err(),
            Error::LengthMismatch {
                name: "upper",
                expected: 5,
                found: 4
            }
        );
    }

    #[test]
    fn output_buffers_must_match() {
        let a = [0.0; 3];
        let b = [0.0; 2];
        assert!(output_len(&a, &b).is_err());
        assert!(output_len(&[], &[]).is_err());
        assert_eq!(output_len(&a, &a).unwrap(), 3);
    }
}
