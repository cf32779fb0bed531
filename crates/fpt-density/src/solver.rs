//! Public front end for the density solvers.
//!
//! [`FptSolver`] carries a [`Settings`] value and forwards to the
//! recursion and closed-form kernels; the free `solve_fpt*` and
//! `*_density` functions do the same with `Settings::default()`.
//!
//! Every entry point writes into caller-owned `g1` (upper boundary) and `g2`
//! (lower boundary) buffers whose common length is the step count. Inputs
//! are checked before anything is written, and on error the outputs are
//! left as they were.

use crate::closed_form;
use crate::recursive;
use crate::schedule::DiffusionSchedule;
use crate::settings::Settings;
use crate::symmetric;
use crate::weighted;
use fpt_core::{errors::Result, Density, Real, Time};

/// First-passage density solver configured by [`Settings`].
///
/// # Example
/// ```
/// use fpt_density::{FptSolver, Settings};
///
/// let solver = FptSolver::new(Settings::new().with_scratch_limit(1 << 20));
/// let (mut g1, mut g2) = (vec![0.0; 200], vec![0.0; 200]);
/// solver.const_bound_density(1.0, 1.0, 0.01, &mut g1, &mut g2).unwrap();
/// assert!(g1.iter().sum::<f64>() > g2.iter().sum::<f64>());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FptSolver {
    settings: Settings,
}

impl FptSolver {
    /// Create a solver with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// The solver's settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// General recursion without leak.
    ///
    /// The step count is `g1.len()`; every schedule must cover it.
    pub fn solve(
        &self,
        schedule: &DiffusionSchedule<'_>,
        g1: &mut [Density],
        g2: &mut [Density],
    ) -> Result<()> {
        recursive::solve(schedule, &mut self.settings.scratch(), g1, g2)
    }

    /// General recursion with leak rate `inv_leak ≥ 0`.
    ///
    /// `inv_leak == 0` reproduces [`solve`](Self::solve) exactly.
    pub fn solve_leak(
        &self,
        schedule: &DiffusionSchedule<'_>,
        inv_leak: Real,
        g1: &mut [Density],
        g2: &mut [Density],
    ) -> Result<()> {
        recursive::solve_leak(schedule, inv_leak, &mut self.settings.scratch(), g1, g2)
    }

    /// Unit-variance recursion with drift schedule `drift` between `±bound`.
    pub fn solve_symmetric(
        &self,
        drift: &[Real],
        bound: &[Real],
        delta_t: Time,
        g1: &mut [Density],
        g2: &mut [Density],
    ) -> Result<()> {
        symmetric::solve_symmetric(drift, bound, delta_t, &mut self.settings.scratch(), g1, g2)
    }

    /// Unit-variance recursion with constant drift `mu > 0` between `±bound`.
    pub fn solve_const_drift(
        &self,
        mu: Real,
        bound: &[Real],
        delta_t: Time,
        g1: &mut [Density],
        g2: &mut [Density],
    ) -> Result<()> {
        symmetric::solve_const_drift(mu, bound, delta_t, &mut self.settings.scratch(), g1, g2)
    }

    /// Weighted-input recursion; `g2 = g1·exp(−2·weight·bound)` at every step.
    pub fn solve_weighted(
        &self,
        drift: &[Real],
        bound: &[Real],
        weight: Real,
        delta_t: Time,
        g1: &mut [Density],
        g2: &mut [Density],
    ) -> Result<()> {
        weighted::solve_weighted(
            drift,
            bound,
            weight,
            delta_t,
            &mut self.settings.scratch(),
            g1,
            g2,
        )
    }

    /// Closed form for constant drift `mu > 0` and flat bounds `±bound`.
    pub fn const_bound_density(
        &self,
        mu: Real,
        bound: Real,
        delta_t: Time,
        g1: &mut [Density],
        g2: &mut [Density],
    ) -> Result<()> {
        closed_form::const_bound_density(mu, bound, delta_t, &self.settings.series, g1, g2)
    }

    /// Closed form for constant drift and flat bounds `lower < 0 < upper`.
    pub fn asym_bound_density(
        &self,
        mu: Real,
        upper: Real,
        lower: Real,
        delta_t: Time,
        g1: &mut [Density],
        g2: &mut [Density],
    ) -> Result<()> {
        closed_form::asym_bound_density(mu, upper, lower, delta_t, &self.settings.series, g1, g2)
    }

    /// Upper-boundary half of [`asym_bound_density`](Self::asym_bound_density).
    pub fn asym_upper_density(
        &self,
        mu: Real,
        upper: Real,
        lower: Real,
        delta_t: Time,
        g1: &mut [Density],
    ) -> Result<()> {
        closed_form::asym_upper_density(mu, upper, lower, delta_t, &self.settings.series, g1)
    }

    /// Lower-boundary half of [`asym_bound_density`](Self::asym_bound_density).
    pub fn asym_lower_density(
        &self,
        mu: Real,
        upper: Real,
        lower: Real,
        delta_t: Time,
        g2: &mut [Density],
    ) -> Result<()> {
        closed_form::asym_lower_density(mu, upper, lower, delta_t, &self.settings.series, g2)
    }
}

/// [`FptSolver::solve`] with default settings.
///
/// # Example
/// ```
/// use fpt_density::{boundary_derivative, solve_fpt, DiffusionSchedule};
///
/// let (k_max, dt) = (100, 0.01);
/// let drift = vec![0.5; k_max];
/// let var = vec![1.0; k_max];
/// let upper: Vec<f64> = (0..k_max).map(|k| 1.0 - 0.1 * (k + 1) as f64 * dt).collect();
/// let lower: Vec<f64> = upper.iter().map(|b| -b).collect();
/// let up_d = boundary_derivative(&upper, dt).unwrap();
/// let lo_d = boundary_derivative(&lower, dt).unwrap();
/// let s = DiffusionSchedule::new(&drift, &var, &lower, &upper, &lo_d, &up_d, dt);
///
/// let (mut g1, mut g2) = (vec![0.0; k_max], vec![0.0; k_max]);
/// solve_fpt(&s, &mut g1, &mut g2).unwrap();
/// assert!(g1.iter().chain(&g2).all(|&g| g >= 0.0));
/// ```
pub fn solve_fpt(schedule: &DiffusionSchedule<'_>, g1: &mut [Density], g2: &mut [Density]) -> Result<()> {
    FptSolver::default().solve(schedule, g1, g2)
}

/// [`FptSolver::solve_leak`] with default settings.
pub fn solve_fpt_leak(
    schedule: &DiffusionSchedule<'_>,
    inv_leak: Real,
    g1: &mut [Density],
    g2: &mut [Density],
) -> Result<()> {
    FptSolver::default().solve_leak(schedule, inv_leak, g1, g2)
}

/// [`FptSolver::solve_symmetric`] with default settings.
pub fn solve_fpt_symmetric(
    drift: &[Real],
    bound: &[Real],
    delta_t: Time,
    g1: &mut [Density],
    g2: &mut [Density],
) -> Result<()> {
    FptSolver::default().solve_symmetric(drift, bound, delta_t, g1, g2)
}

/// [`FptSolver::solve_const_drift`] with default settings.
pub fn solve_fpt_const_drift(
    mu: Real,
    bound: &[Real],
    delta_t: Time,
    g1: &mut [Density],
    g2: &mut [Density],
) -> Result<()> {
    FptSolver::default().solve_const_drift(mu, bound, delta_t, g1, g2)
}

/// [`FptSolver::solve_weighted`] with default settings.
pub fn solve_fpt_weighted(
    drift: &[Real],
    bound: &[Real],
    weight: Real,
    delta_t: Time,
    g1: &mut [Density],
    g2: &mut [Density],
) -> Result<()> {
    FptSolver::default().solve_weighted(drift, bound, weight, delta_t, g1, g2)
}

/// [`FptSolver::const_bound_density`] with default settings.
pub fn const_bound_density(
    mu: Real,
    bound: Real,
    delta_t: Time,
    g1: &mut [Density],
    g2: &mut [Density],
) -> Result<()> {
    FptSolver::default().const_bound_density(mu, bound, delta_t, g1, g2)
}

/// [`FptSolver::asym_bound_density`] with default settings.
pub fn asym_bound_density(
    mu: Real,
    upper: Real,
    lower: Real,
    delta_t: Time,
    g1: &mut [Density],
    g2: &mut [Density],
) -> Result<()> {
    FptSolver::default().asym_bound_density(mu, upper, lower, delta_t, g1, g2)
}

/// [`FptSolver::asym_upper_density`] with default settings.
pub fn asym_upper_density(
    mu: Real,
    upper: Real,
    lower: Real,
    delta_t: Time,
    g1: &mut [Density],
) -> Result<()> {
    FptSolver::default().asym_upper_density(mu, upper, lower, delta_t, g1)
}

/// [`FptSolver::asym_lower_density`] with default settings.
pub fn asym_lower_density(
    mu: Real,
    upper: Real,
    lower: Real,
    delta_t: Time,
    g2: &mut [Density],
) -> Result<()> {
    FptSolver::default().asym_lower_density(mu, upper, lower, delta_t, g2)
}
