//! Schedule resizing.

use crate::{errors::Error, errors::Result, Real};

/// Copy `schedule` into a new vector of `new_len` elements.
///
/// The prefix `schedule[..min(len, new_len)]` is copied; if the new vector
/// is longer, the remainder is filled with `fill`. Used to adapt a drift or
/// boundary schedule of one length to a grid of another.
///
/// # Example
/// ```
/// use fpt_core::extend_schedule;
/// let v = extend_schedule(&[1.0, 2.0], 4, 2.0).unwrap();
/// assert_eq!(v, vec![1.0, 2.0, 2.0, 2.0]);
/// let v = extend_schedule(&[1.0, 2.0, 3.0], 2, 0.0).unwrap();
/// assert_eq!(v, vec![1.0, 2.0]);
/// ```
pub fn extend_schedule(schedule: &[Real], new_len: usize, fill: Real) -> Result<Vec<Real>> {
    let mut out = Vec::new();
    out.try_reserve_exact(new_len)
        .map_err(|_| Error::Allocation { requested: new_len })?;
    let kept = schedule.len().min(new_len);
    out.extend_from_slice(&schedule[..kept]);
    out.resize(new_len, fill);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_length_is_a_copy() {
        let v = [0.5, 0.25, 0.125];
        assert_eq!(extend_schedule(&v, 3, 9.0).unwrap(), v.to_vec());
    }

    #[test]
    fn empty_source_is_all_fill() {
        assert_eq!(extend_schedule(&[], 3, 1.5).unwrap(), vec![1.5; 3]);
    }

    #[test]
    fn shrink_to_zero() {
        assert!(extend_schedule(&[1.0, 2.0], 0, 0.0).unwrap().is_empty());
    }

    #[test]
    fn impossible_length_fails_cleanly() {
        assert_eq!(
            extend_schedule(&[1.0], usize::MAX, 0.0).unwrap_err(),
            Error::Allocation {
                requested: usize::MAX
            }
        );
    }
}
