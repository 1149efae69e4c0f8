//! Swap and block-swap mutation.

use crate::models::Assignment;
use rand::Rng;
use std::collections::HashSet;

/// Applies swap mutation to `assignment` in place.
///
/// The effective mutation rate is `base_rate * (1 + exp(-gen/20))`, clamped
/// to `<= 1.0`, so early generations mutate more.
///
/// With probability `effective_rate`, swaps two random positions. Then, with
/// probability 0.3, additionally attempts a block swap of a random length in
/// `[2, 6]` between two (possibly overlapping) block offsets. A block swap
/// that collides with itself (the two blocks overlap or otherwise share
/// seats) is rejected, keeping only the initial single swap.
pub fn mutate<R: Rng>(assignment: &mut Assignment, base_rate: f64, generation: u32, rng: &mut R) {
    let effective_rate = (base_rate * (1.0 + (-(generation as f64) / 20.0).exp())).min(1.0);
    if assignment.len() < 2 {
        return;
    }
    if rng.random_bool(effective_rate) {
        swap_mutation(assignment, rng);
        if rng.random_bool(0.3) {
            try_block_swap(assignment, rng);
        }
    }
}

fn swap_mutation<R: Rng>(assignment: &mut Assignment, rng: &mut R) {
    let n = assignment.len();
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n);
    while j == i {
        j = rng.random_range(0..n);
    }
    assignment.swap(i, j);
}

fn try_block_swap<R: Rng>(assignment: &mut Assignment, rng: &mut R) {
    let n = assignment.len();
    let max_len = 6.min(n);
    if max_len < 2 {
        return;
    }
    let l = rng.random_range(2..=max_len);
    let s1 = rng.random_range(0..=(n - l));
    let s2 = rng.random_range(0..=(n - l));

    let before = assignment.clone();
    for k in 0..l {
        assignment.swap(s1 + k, s2 + k);
    }
    if !is_valid_permutation(assignment) {
        *assignment = before;
    }
}

fn is_valid_permutation(assignment: &Assignment) -> bool {
    let set: HashSet<_> = assignment.iter().collect();
    set.len() == assignment.len()
}
