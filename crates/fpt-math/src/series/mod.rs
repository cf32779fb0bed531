//! Series expansions of the first-passage time density of a standard
//! (zero-drift, unit-variance) process between boundaries `{0, 1}`.
//!
//! Two expansions of the same density are available (Navarro & Fuss,
//! 2009): a sum of Gaussian images that converges quickly for small `t`
//! and a Fourier-sine series that converges quickly for large `t`.
//! [`choose_series`] picks between them, and [`fast_series`] /
//! [`sym_fast_series`] dispatch accordingly.
//!
//! Every sum is capped at [`SeriesControl::max_terms`] terms. Hitting the
//! cap returns the partial sum with `converged == false` and emits a
//! `tracing` warning.

mod asymmetric;
mod symmetric;

pub use asymmetric::{
    fast_series, fast_series_with, long_time_series, long_time_series_with, short_time_series,
    short_time_series_with,
};
pub use symmetric::{sym_fast_series, sym_fast_series_with, sym_series, sym_series_with};

use crate::constants::{MAX_SERIES_TERMS, PI_SQR, SERIES_ACC, TWO_PI};
use fpt_core::{Real, Time};
use std::f64::consts::PI;

/// Which of the two expansions to sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    /// Gaussian-image expansion, fast for small `t`.
    Short,
    /// Fourier-sine expansion, fast for large `t`.
    Long,
}

/// Accuracy and iteration cap for a series evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesControl {
    /// Absolute accuracy; summation stops once an added term falls below
    /// this (scaled by the series' leading factor).
    pub tolerance: Real,
    /// Maximum number of terms added before giving up.
    pub max_terms: usize,
}

impl SeriesControl {
    /// Create a new control.
    pub fn new(tolerance: Real, max_terms: usize) -> Self {
        Self {
            tolerance,
            max_terms,
        }
    }

    /// The tolerance actually used: non-positive or non-finite values would
    /// never terminate, so they fall back to [`SERIES_ACC`].
    pub fn effective_tolerance(&self) -> Real {
        if self.tolerance > 0.0 && self.tolerance.is_finite() {
            self.tolerance
        } else {
            SERIES_ACC
        }
    }
}

impl Default for SeriesControl {
    fn default() -> Self {
        Self {
            tolerance: SERIES_ACC,
            max_terms: MAX_SERIES_TERMS,
        }
    }
}

/// Result of summing a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSum {
    /// The (scaled) sum.
    pub value: Real,
    /// Number of terms added after the leading one.
    pub terms: usize,
    /// Whether the last added term fell below the tolerance.
    pub converged: bool,
}

impl SeriesSum {
    pub(crate) fn zero() -> Self {
        Self {
            value: 0.0,
            terms: 0,
            converged: true,
        }
    }
}

/// Pick the expansion that needs fewer terms at `(t, tol)`.
///
/// Navarro & Fuss (2009), Eq. 13: the short-time series is used when
///
/// ```text
/// 2 + √(−2t · ln(2·tol·√(2πt)))  <  √(−2 · ln(π·t·tol) / (π²·t))
/// ```
///
/// The comparison is literal. A NaN on either side (a logarithm of an
/// argument above one) makes it false and selects the long-time series.
pub fn choose_series(t: Time, tol: Real) -> SeriesKind {
    let short_terms = 2.0 + (-2.0 * t * (2.0 * tol * (TWO_PI * t).sqrt()).ln()).sqrt();
    let long_terms = (-2.0 * (PI * t * tol).ln() / (t * PI_SQR)).sqrt();
    if short_terms < long_terms {
        SeriesKind::Short
    } else {
        SeriesKind::Long
    }
}

/// Log a summation that stopped at its term cap. `at` is the argument the
/// series was evaluated at: the time for the general expansions, the
/// exponent scale `a` for the midpoint series.
pub(crate) fn warn_unconverged(series: &'static str, at: Real, sum: &SeriesSum) {
    if !sum.converged {
        tracing::warn!(
            series,
            at,
            terms = sum.terms,
            value = sum.value,
            "series hit its term cap before reaching the tolerance"
        );
    }
}

/// Run `f` under a subscriber that counts `WARN` events on this thread.
#[cfg(test)]
pub(crate) fn warnings_during<R>(f: impl FnOnce() -> R) -> (R, usize) {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Metadata};

    struct WarnCounter(Arc<AtomicUsize>);

    impl tracing::Subscriber for WarnCounter {
        fn enabled(&self, _: &Metadata<'_>) -> bool {
            true
        }
        fn new_span(&self, _: &Attributes<'_>) -> Id {
            Id::from_u64(1)
        }
        fn record(&self, _: &Id, _: &Record<'_>) {}
        fn record_follows_from(&self, _: &Id, _: &Id) {}
        fn event(&self, event: &Event<'_>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
        fn enter(&self, _: &Id) {}
        fn exit(&self, _: &Id) {}
    }

    let count = Arc::new(AtomicUsize::new(0));
    let out = tracing::subscriber::with_default(WarnCounter(Arc::clone(&count)), f);
    (out, count.load(Ordering::SeqCst))
}
