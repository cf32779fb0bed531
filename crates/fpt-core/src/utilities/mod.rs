//! Miscellaneous utilities.

pub mod extend;
pub mod scratch;
