//! Order-preserving crossover.

use crate::models::Assignment;
use rand::Rng;
use std::collections::HashSet;

/// With probability `rate`, performs order-preserving crossover on
/// `parent1`/`parent2` and returns the two children; otherwise returns
/// copies of the parents unchanged.
///
/// A cut `start..=end` is chosen uniformly (`start` in `[0, N)`, `end` in
/// `[start, N)`). Child 1 keeps `parent1[start..=end]` in place; the rest of
/// its positions are filled by walking `parent2` cyclically from `end + 1`,
/// skipping seats already present, placing into child positions from
/// `end + 1` onward. Child 2 is the mirror image. Both children are
/// guaranteed permutations of the parents' seat positions.
pub fn crossover<R: Rng>(
    parent1: &Assignment,
    parent2: &Assignment,
    rate: f64,
    rng: &mut R,
) -> (Assignment, Assignment) {
    if rng.random::<f64>() >= rate {
        return (parent1.clone(), parent2.clone());
    }

    let n = parent1.len();
    let start = rng.random_range(0..n);
    let end = start + rng.random_range(0..(n - start));

    let child1 = order_preserving_fill(parent1, parent2, start, end);
    let child2 = order_preserving_fill(parent2, parent1, start, end);
    (child1, child2)
}

fn order_preserving_fill(
    keep: &Assignment,
    fill_from: &Assignment,
    start: usize,
    end: usize,
) -> Assignment {
    let n = keep.len();
    let mut child: Vec<Option<usize>> = vec![None; n];
    let mut present: HashSet<usize> = HashSet::new();

    for pos in start..=end {
        child[pos] = Some(keep[pos]);
        present.insert(keep[pos]);
    }

    let mut dest = (end + 1) % n;
    let mut src = (end + 1) % n;
    for _ in 0..n {
        let v = fill_from[src];
        if !present.contains(&v) {
            while child[dest].is_some() {
                dest = (dest + 1) % n;
            }
            child[dest] = Some(v);
            present.insert(v);
            dest = (dest + 1) % n;
        }
        src = (src + 1) % n;
    }

    child.into_iter().map(|v| v.expect("crossover fills every position")).collect()
}
