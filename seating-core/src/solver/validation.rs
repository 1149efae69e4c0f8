//! Validation helpers for the solver's internal invariants: rather than
//! trusting every operator to preserve the permutation invariant, one place
//! checks it and can be called after any move that risks breaking it (see
//! the block-swap guard in `solver::moves::mutation`).

use crate::models::{Assignment, SeatingError};
use crate::venue::Venue;
use std::collections::HashSet;

/// Checks that `assignment` is a permutation of `N` distinct seat positions
/// drawn from `[0, venue.capacity())`.
pub fn validate_assignment(assignment: &Assignment, venue: &Venue) -> Result<(), SeatingError> {
    if assignment.iter().any(|&pos| pos >= venue.capacity()) {
        return Err(SeatingError::Config(
            "assignment references a seat outside the venue".to_string(),
        ));
    }
    let unique: HashSet<usize> = assignment.iter().copied().collect();
    if unique.len() != assignment.len() {
        return Err(SeatingError::Config(
            "assignment is not a permutation: duplicate seat positions".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_permutation_passes() {
        let venue = Venue::build(2, 2, 0).unwrap();
        assert!(validate_assignment(&vec![0, 1, 2, 3], &venue).is_ok());
    }

    #[test]
    fn duplicate_seat_is_rejected() {
        let venue = Venue::build(2, 2, 0).unwrap();
        assert!(validate_assignment(&vec![0, 0], &venue).is_err());
    }

    #[test]
    fn out_of_range_seat_is_rejected() {
        let venue = Venue::build(2, 2, 0).unwrap();
        assert!(validate_assignment(&vec![4], &venue).is_err());
    }
}
