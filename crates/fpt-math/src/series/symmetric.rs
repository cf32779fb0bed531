//! Lower-boundary density for the midpoint start `w = ½`.
//!
//! At the midpoint both expansions collapse to the same alternating form
//!
//! ```text
//! f = b · (e^{−a} − 3e^{−9a} + 5e^{−25a} − 7e^{−49a} + …)
//! ```
//!
//! with `(a, b) = (1/8t, (8π t³)^(−1/2))` for short times and
//! `(a, b) = (π² t / 2, π)` for long times.

use super::{choose_series, warn_unconverged, SeriesControl, SeriesKind, SeriesSum};
use crate::constants::{MAX_SERIES_TERMS, PI_SQR};
use fpt_core::{Real, Time};
use std::f64::consts::PI;

/// Sum the alternating midpoint series for the parameterisation `(a, b)`.
pub fn sym_series(a: Real, b: Real, tol: Real) -> Real {
    sym_series_with(a, b, &SeriesControl::new(tol, MAX_SERIES_TERMS)).value
}

/// [`sym_series`] with an explicit term cap, reporting convergence.
pub fn sym_series_with(a: Real, b: Real, control: &SeriesControl) -> SeriesSum {
    let tol = control.effective_tolerance() * b;
    let mut f = (-a).exp();
    let mut sum = SeriesSum {
        value: 0.0,
        terms: 0,
        converged: false,
    };
    for n in 0..control.max_terms {
        let twok = (2 * n + 3) as Real;
        let incr = twok * (-(twok * twok) * a).exp();
        if n % 2 == 0 {
            f -= incr;
        } else {
            f += incr;
        }
        sum.terms = n + 1;
        if incr < tol {
            sum.converged = true;
            break;
        }
    }
    sum.value = f * b;
    warn_unconverged("symmetric", a, &sum);
    sum
}

/// Lower-boundary density at `t` of a standard process started at `½`.
///
/// Returns exactly `0.0` at `t == 0`.
pub fn sym_fast_series(t: Time, tol: Real) -> Real {
    sym_fast_series_with(t, &SeriesControl::new(tol, MAX_SERIES_TERMS)).value
}

/// [`sym_fast_series`] with an explicit term cap, reporting convergence.
pub fn sym_fast_series_with(t: Time, control: &SeriesControl) -> SeriesSum {
    if t == 0.0 {
        return SeriesSum::zero();
    }
    match choose_series(t, control.effective_tolerance()) {
        SeriesKind::Short => sym_series_with(
            1.0 / (8.0 * t),
            1.0 / (8.0 * PI * t.powi(3)).sqrt(),
            control,
        ),
        SeriesKind::Long => sym_series_with(t * PI_SQR / 2.0, PI, control),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SERIES_ACC;
    use crate::series::{fast_series, warnings_during};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn zero_time_is_exactly_zero() {
        assert_eq!(sym_fast_series(0.0, SERIES_ACC), 0.0);
    }

    #[test]
    fn both_parameterisations_agree() {
        for &t in &[0.1_f64, 0.25, 0.5] {
            let short = sym_series(1.0 / (8.0 * t), 1.0 / (8.0 * PI * t.powi(3)).sqrt(), SERIES_ACC);
            let long = sym_series(t * PI_SQR / 2.0, PI, SERIES_ACC);
            assert_relative_eq!(short, long, max_relative = 1e-10);
        }
    }

    #[test]
    fn matches_general_series_at_midpoint() {
        for &t in &[1e-3, 0.03, 0.3, 1.0, 3.0] {
            assert_relative_eq!(
                sym_fast_series(t, SERIES_ACC),
                fast_series(t, 0.5, SERIES_ACC),
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn term_cap_reports_non_convergence() {
        let (sum, warnings) =
            warnings_during(|| sym_series_with(1e-8, 1.0, &SeriesControl::new(SERIES_ACC, 3)));
        assert!(!sum.converged);
        assert_eq!(sum.terms, 3);
        assert_eq!(warnings, 1);
    }

    #[test]
    fn capped_midpoint_series_warns_once_per_call() {
        let capped = SeriesControl::new(SERIES_ACC, 1);
        let (_, warnings) = warnings_during(|| sym_series(0.5, 1.0, SERIES_ACC));
        assert_eq!(warnings, 0);
        let (sum, warnings) = warnings_during(|| sym_fast_series_with(0.5, &capped));
        assert!(!sum.converged);
        assert_eq!(warnings, 1);
    }

    proptest! {
        #[test]
        fn sym_fast_series_terminates_quickly(t in 1e-6f64..10.0) {
            let sum = sym_fast_series_with(t, &SeriesControl::default());
            prop_assert!(sum.converged);
            prop_assert!(sum.terms < 10_000);
            prop_assert!(sum.value >= 0.0);
        }
    }
}
