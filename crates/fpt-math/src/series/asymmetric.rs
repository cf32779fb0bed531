//! Lower-boundary density for a start point `w ∈ (0, 1)`.

use super::{choose_series, warn_unconverged, SeriesControl, SeriesKind, SeriesSum};
use crate::constants::{MAX_SERIES_TERMS, TWO_PI};
use fpt_core::{Real, Time};
use std::f64::consts::PI;

/// Short-time expansion (Navarro & Fuss, 2009, Eq. 6).
///
/// ```text
/// f(t|w) = (2π t³)^(−1/2) Σ_{k=−∞}^{∞} (w + 2k) · exp(−(w + 2k)² / 2t)
/// ```
///
/// Terms are added in the order `k = 0, 1, −1, 2, −2, …` until one falls
/// below `tol` times the leading factor `(2π t³)^(−1/2)`.
pub fn short_time_series(t: Time, w: Real, tol: Real) -> Real {
    short_time_series_with(t, w, &SeriesControl::new(tol, MAX_SERIES_TERMS)).value
}

/// [`short_time_series`] with an explicit term cap, reporting convergence.
pub fn short_time_series_with(t: Time, w: Real, control: &SeriesControl) -> SeriesSum {
    let scale = t.powf(-1.5) / TWO_PI.sqrt();
    let tol = control.effective_tolerance() * scale;
    let two_t = 2.0 * t;
    let mut f = w * (-w * w / two_t).exp();
    let mut sum = SeriesSum {
        value: f * scale,
        terms: 0,
        converged: false,
    };
    for n in 0..control.max_terms {
        let k = (n / 2 + 1) as Real;
        let c = if n % 2 == 0 { w + 2.0 * k } else { w - 2.0 * k };
        let incr = c * (-c * c / two_t).exp();
        f += incr;
        sum.terms = n + 1;
        if incr.abs() < tol {
            sum.converged = true;
            break;
        }
    }
    sum.value = f * scale;
    warn_unconverged("short_time", t, &sum);
    sum
}

/// Long-time expansion (Navarro & Fuss, 2009, Eq. 5).
///
/// ```text
/// f(t|w) = π Σ_{k=1}^{∞} k · exp(−k²π² t / 2) · sin(kπ w)
/// ```
pub fn long_time_series(t: Time, w: Real, tol: Real) -> Real {
    long_time_series_with(t, w, &SeriesControl::new(tol, MAX_SERIES_TERMS)).value
}

/// [`long_time_series`] with an explicit term cap, reporting convergence.
pub fn long_time_series_with(t: Time, w: Real, control: &SeriesControl) -> SeriesSum {
    let tol = control.effective_tolerance() * PI;
    let mut f = 0.0;
    let mut sum = SeriesSum {
        value: 0.0,
        terms: 0,
        converged: false,
    };
    for n in 0..control.max_terms {
        let k = (n + 1) as Real;
        let kpi = k * PI;
        let incr = k * (-(kpi * kpi) * t / 2.0).exp() * (kpi * w).sin();
        f += incr;
        sum.terms = n + 1;
        if incr.abs() < tol {
            sum.converged = true;
            break;
        }
    }
    sum.value = f * PI;
    warn_unconverged("long_time", t, &sum);
    sum
}

/// Lower-boundary density at `t` of a standard process started at `w`,
/// summed with whichever expansion [`choose_series`] prefers.
///
/// Returns exactly `0.0` at `t == 0`: no mass can be absorbed before any
/// time has elapsed.
pub fn fast_series(t: Time, w: Real, tol: Real) -> Real {
    fast_series_with(t, w, &SeriesControl::new(tol, MAX_SERIES_TERMS)).value
}

/// [`fast_series`] with an explicit term cap, reporting convergence.
pub fn fast_series_with(t: Time, w: Real, control: &SeriesControl) -> SeriesSum {
    if t == 0.0 {
        return SeriesSum::zero();
    }
    match choose_series(t, control.effective_tolerance()) {
        SeriesKind::Short => short_time_series_with(t, w, control),
        SeriesKind::Long => long_time_series_with(t, w, control),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SERIES_ACC;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn zero_time_is_exactly_zero() {
        assert_eq!(fast_series(0.0, 0.3, SERIES_ACC), 0.0);
        assert_eq!(fast_series(0.0, 0.5, SERIES_ACC), 0.0);
    }

    #[test]
    fn expansions_agree_where_both_converge() {
        for &t in &[0.05_f64, 0.1, 0.2, 0.4, 0.8] {
            for &w in &[0.2_f64, 0.5, 0.7] {
                if (t, w) == (0.05, 0.7) {
                    // see short_series_stops_after_small_positive_image
                    continue;
                }
                let short = short_time_series(t, w, SERIES_ACC);
                let long = long_time_series(t, w, SERIES_ACC);
                assert_relative_eq!(short, long, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn short_series_stops_after_small_positive_image() {
        // The w + 2 image drops below the threshold first, so the larger
        // w − 2 image is never added.
        let (t, w): (Time, Real) = (0.05, 0.7);
        let control = SeriesControl::new(SERIES_ACC, MAX_SERIES_TERMS);
        let short = short_time_series_with(t, w, &control);
        assert!(short.converged);
        assert_eq!(short.terms, 1);

        let scale = t.powf(-1.5) / TWO_PI.sqrt();
        let image = |c: Real| c * (-c * c / (2.0 * t)).exp();
        assert_relative_eq!(
            short.value,
            scale * (image(w) + image(w + 2.0)),
            max_relative = 1e-14
        );

        let long = long_time_series(t, w, SERIES_ACC);
        assert!(((short.value - long) / long).abs() > 1e-6);
        assert_relative_eq!(
            long,
            scale * (image(w) + image(w + 2.0) + image(w - 2.0)),
            max_relative = 1e-10
        );

        assert_eq!(choose_series(t, SERIES_ACC), SeriesKind::Short);
        assert_eq!(fast_series(t, w, SERIES_ACC), short.value);
    }

    #[test]
    fn density_integrates_to_hitting_probability() {
        // Zero drift: P(lower first | start w) = 1 − w.
        let w = 0.3;
        let dt = 1e-4;
        let mass: Real = (1..=100_000)
            .map(|i| fast_series(i as Real * dt, w, SERIES_ACC) * dt)
            .sum();
        assert_relative_eq!(mass, 1.0 - w, epsilon = 1e-4);
    }

    #[test]
    fn term_cap_reports_non_convergence() {
        let control = SeriesControl::new(SERIES_ACC, 1);
        let sum = long_time_series_with(1e-3, 0.5, &control);
        assert!(!sum.converged);
        assert_eq!(sum.terms, 1);
    }

    proptest! {
        #[test]
        fn fast_series_terminates_quickly(t in 1e-6f64..10.0, w in 0.01f64..0.99) {
            let sum = fast_series_with(t, w, &SeriesControl::default());
            prop_assert!(sum.converged);
            prop_assert!(sum.terms < 10_000);
            prop_assert!(sum.value.is_finite());
        }
    }
}
