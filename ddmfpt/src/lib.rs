//! # ddmfpt
//!
//! First-passage time densities of drift-diffusion models: the time at
//! which a noisy accumulator first reaches an upper or lower decision
//! boundary.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `fpt-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! ddmfpt = "0.1"
//! ```
//!
//! ```rust
//! use ddmfpt::density::{const_bound_density, normalize_mass};
//!
//! let dt = 0.01;
//! let (mut g1, mut g2) = (vec![0.0; 600], vec![0.0; 600]);
//! const_bound_density(1.0, 1.0, dt, &mut g1, &mut g2).unwrap();
//! normalize_mass(&mut g1, &mut g2, dt).unwrap();
//!
//! let p_upper: f64 = g1.iter().sum::<f64>() * dt;
//! assert!((p_upper - 1.0 / (1.0 + (-2.0f64).exp())).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, error definitions, and scratch allocation.
pub use fpt_core as core;

/// Series expansions and the crossing-flux kernel.
pub use fpt_math as math;

/// Density solvers, settings, and mass normalisation.
pub use fpt_density as density;
