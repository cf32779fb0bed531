//! Budgeted scratch allocation.
//!
//! Every solver call owns a [`Scratch`] for its duration. Buffers handed
//! out by it are plain `Vec<Real>`s owned by the caller's stack frame, so
//! an early `?` return drops whatever was acquired before the failure.

use crate::{errors::Error, errors::Result, Real};

/// Allocator for the per-call cumulative-statistics buffers.
///
/// Allocation goes through `Vec::try_reserve_exact`, so a failed request is
/// reported as [`Error::Allocation`] instead of aborting the process. An
/// optional element budget caps the total number of `Real`s a single call
/// may hold.
#[derive(Debug, Clone, Default)]
pub struct Scratch {
    limit: Option<usize>,
    used: usize,
}

impl Scratch {
    /// Create an allocator holding at most `limit` elements (`None` for no cap).
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit, used: 0 }
    }

    /// Create an allocator without an element budget.
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Number of elements handed out so far.
    pub fn used(&self) -> usize {
        self.used
    }

    /// The element budget, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Allocate a zero-filled buffer of `len` elements.
    pub fn allocate(&mut self, len: usize) -> Result<Vec<Real>> {
        let within_budget = self
            .limit
            .map_or(true, |limit| self.used.saturating_add(len) <= limit);
        let mut buf = Vec::new();
        if !within_budget || buf.try_reserve_exact(len).is_err() {
            tracing::warn!(
                requested = len,
                used = self.used,
                limit = ?self.limit,
                "scratch allocation failed"
            );
            return Err(Error::Allocation { requested: len });
        }
        buf.resize(len, 0.0);
        self.used += len;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_allocates_zeroed() {
        let mut scratch = Scratch::unbounded();
        let buf = scratch.allocate(16).unwrap();
        assert_eq!(buf.len(), 16);
        assert!(buf.iter().all(|&x| x == 0.0));
        assert_eq!(scratch.used(), 16);
    }

    #[test]
    fn budget_rejects_overflowing_request() {
        let mut scratch = Scratch::new(Some(10));
        let first = scratch.allocate(6).unwrap();
        assert_eq!(first.len(), 6);
        assert_eq!(
            scratch.allocate(5).unwrap_err(),
            Error::Allocation { requested: 5 }
        );
        // a failed request consumes nothing
        assert_eq!(scratch.used(), 6);
        assert!(scratch.allocate(4).is_ok());
    }

    #[test]
    fn capacity_overflow_is_reported() {
        let mut scratch = Scratch::unbounded();
        let err = scratch.allocate(usize::MAX).unwrap_err();
        assert!(err.is_retryable());
    }
}
