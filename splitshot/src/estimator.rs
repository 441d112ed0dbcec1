//! Up-front sizing of a pattern search.

use crate::error::ValidationError;

/// Number of multisets of size `desired_count` drawn from `active_count` classes,
/// `C(active_count + desired_count - 1, desired_count)`.
///
/// Evaluated multiplicatively over the smaller of the two symmetric forms; every partial
/// product is itself a binomial coefficient, so each division is exact.
pub fn estimate_combination_count(active_count: usize, desired_count: usize) -> Result<u128, ValidationError> {
    if active_count == 0 {
        return Err(ValidationError::EmptySelection);
    }
    if desired_count == 0 {
        return Err(ValidationError::NonPositiveCount);
    }

    let n = active_count as u128 + desired_count as u128 - 1;
    let k = (desired_count as u128).min(active_count as u128 - 1);
    let mut count: u128 = 1;
    for i in 1..=k {
        count = count.checked_mul(n - k + i).ok_or(ValidationError::CombinationCountOverflow)? / i;
    }
    Ok(count)
}
