//! # fpt-core
//!
//! Core types, error definitions, and scratch-memory helpers shared by the
//! ddmfpt crates.
//!
//! This crate provides the foundational building blocks used by the
//! numerics and density crates: the `Real` alias family, the error
//! hierarchy with its `ensure!` / `fail!` macros, budgeted scratch
//! allocation, and schedule resizing.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Scratch allocation and schedule helpers.
pub mod utilities;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A time measurement in seconds.
pub type Time = Real;

/// A probability density in units of 1/second.
pub type Density = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use utilities::extend::extend_schedule;
pub use utilities::scratch::Scratch;
