//! # fpt-density
//!
//! First-passage time densities of a one-dimensional diffusion between two
//! boundaries, on a uniform time grid.
//!
//! ## Solvers
//!
//! - [`solve_fpt`] / [`solve_fpt_leak`]: coupled Volterra recursion for
//!   time-varying drift, variance, and curved boundaries, optionally with
//!   a leak (mean reversion towards zero)
//! - [`solve_fpt_symmetric`] / [`solve_fpt_const_drift`]: unit-variance
//!   recursions between symmetric bounds `±b(t)`
//! - [`solve_fpt_weighted`]: weighted-input formulation on the
//!   accumulated-squared-drift clock
//! - [`const_bound_density`] / [`asym_bound_density`]: closed form for
//!   constant drift and flat bounds
//!
//! [`normalize_mass`] rescales a computed pair to unit total mass, and
//! [`boundary_derivative`] builds boundary slopes with the forward
//! difference rule the recursions use internally.
//!
//! All solvers run in `O(k_max²)` time (the closed form in `O(k_max)`) and
//! write into caller-owned buffers.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod closed_form;
mod recursive;
mod symmetric;
mod weighted;

pub mod normalization;
pub mod schedule;
pub mod settings;
pub mod solver;

pub use normalization::normalize_mass;
pub use schedule::{boundary_derivative, DiffusionSchedule};
pub use settings::Settings;
pub use solver::{
    asym_bound_density, asym_lower_density, asym_upper_density, const_bound_density, solve_fpt,
    solve_fpt_const_drift, solve_fpt_leak, solve_fpt_symmetric, solve_fpt_weighted, FptSolver,
};
