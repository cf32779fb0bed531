//! Solver configuration.
//!
//! [`Settings`] is a plain value: every [`FptSolver`](crate::FptSolver)
//! carries its own copy, and the free functions of this crate use
//! `Settings::default()`. Nothing here is process-wide.

use fpt_core::{Real, Scratch};
use fpt_math::{SeriesControl, MAX_SERIES_TERMS, SERIES_ACC};

/// Numerical and resource settings for the density solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Accuracy and term cap of the closed-form series.
    pub series: SeriesControl,
    /// Maximum number of scratch `Real`s one solver call may hold
    /// (`None` for no cap).
    pub scratch_limit: Option<usize>,
}

impl Settings {
    /// Settings with default series accuracy and no scratch budget.
    pub fn new() -> Self {
        Self {
            series: SeriesControl::new(SERIES_ACC, MAX_SERIES_TERMS),
            scratch_limit: None,
        }
    }

    /// Set the series tolerance.
    pub fn with_series_tolerance(mut self, tolerance: Real) -> Self {
        self.series.tolerance = tolerance;
        self
    }

    /// Set the maximum number of series terms.
    pub fn with_max_series_terms(mut self, max_terms: usize) -> Self {
        self.series.max_terms = max_terms;
        self
    }

    /// Cap the scratch memory of one call to `limit` elements.
    pub fn with_scratch_limit(mut self, limit: usize) -> Self {
        self.scratch_limit = Some(limit);
        self
    }

    /// A fresh scratch allocator honouring the budget.
    pub fn scratch(&self) -> Scratch {
        Scratch::new(self.scratch_limit)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
