//! Simulated annealer (C6): temperature-scheduled local search used both for
//! per-iteration neighbor exploration and as the driver's final polish pass.

use crate::attendees::AttendeeIndex;
use crate::models::{Assignment, AttendeeType, FitnessRecord, SeatingError, Weights};
use crate::solver::scoring::fitness;
use crate::venue::Venue;
use rand::Rng;
use std::collections::HashSet;

/// Parameters for one simulated-annealing run.
pub struct SimulatedAnnealing {
    pub initial_temp: f64,
    pub cooling_rate: f64,
    pub min_temp: f64,
    pub iterations: u32,
}

impl SimulatedAnnealing {
    pub fn new(initial_temp: f64, cooling_rate: f64, min_temp: f64, iterations: u32) -> Self {
        SimulatedAnnealing {
            initial_temp,
            cooling_rate,
            min_temp,
            iterations,
        }
    }

    /// Runs the annealing schedule starting from `current`/`current_fitness`
    /// and returns the best assignment/fitness seen.
    pub fn run<R: Rng>(
        &self,
        current: Assignment,
        current_fitness: FitnessRecord,
        venue: &Venue,
        idx: &AttendeeIndex,
        weights: &Weights,
        rng: &mut R,
    ) -> Result<(Assignment, FitnessRecord), SeatingError> {
        let mut current = current;
        let mut current_fitness = current_fitness;
        let mut best = current.clone();
        let mut best_fitness = current_fitness;
        let mut temperature = self.initial_temp;

        for _ in 0..self.iterations {
            if temperature <= self.min_temp {
                break;
            }

            let mut neighbor = current.clone();
            let used_targeted = if rng.random_bool(0.5) {
                match find_weak_area(&current, venue, idx, &current_fitness) {
                    Some((a, b)) => {
                        neighbor.swap(a, b);
                        true
                    }
                    None => false,
                }
            } else {
                false
            };
            if !used_targeted {
                random_swap(&mut neighbor, rng);
            }

            let neighbor_fitness = fitness(&neighbor, venue, idx, weights)?;
            let delta = neighbor_fitness.total - current_fitness.total;
            let accept = delta > 0.0 || rng.random::<f64>() < (delta / temperature).exp();

            if accept {
                current = neighbor;
                current_fitness = neighbor_fitness;
                if current_fitness.total > best_fitness.total {
                    best = current.clone();
                    best_fitness = current_fitness;
                }
            }

            temperature *= self.cooling_rate;
        }

        Ok((best, best_fitness))
    }
}

fn random_swap<R: Rng>(assignment: &mut Assignment, rng: &mut R) {
    let n = assignment.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n);
    while j == i {
        j = rng.random_range(0..n);
    }
    assignment.swap(i, j);
}

/// Examines the current sub-scores and proposes a targeted swap addressing
/// the weakest one: VIP placement first (if below 0.8), then group cohesion
/// (if below 0.7). Returns `None` if neither criterion fires or no
/// qualifying pair exists.
fn find_weak_area(
    assignment: &Assignment,
    venue: &Venue,
    idx: &AttendeeIndex,
    fitness_record: &FitnessRecord,
) -> Option<(usize, usize)> {
    if fitness_record.vip_placement < 0.8 {
        if let Some(pair) = find_vip_misplacement(assignment, venue, idx) {
            return Some(pair);
        }
    }
    if fitness_record.group_cohesion < 0.7 {
        if let Some(pair) = find_cohesion_weak_area(assignment, venue, idx) {
            return Some(pair);
        }
    }
    None
}

fn find_vip_misplacement(
    assignment: &Assignment,
    venue: &Venue,
    idx: &AttendeeIndex,
) -> Option<(usize, usize)> {
    let mut vip_in_regular_seat = None;
    let mut regular_in_vip_seat = None;
    for i in 0..idx.len() {
        let seat = venue.seat(assignment[i]);
        let is_vip = matches!(idx.attendees[i].kind, AttendeeType::Vip);
        if is_vip && !seat.is_vip && vip_in_regular_seat.is_none() {
            vip_in_regular_seat = Some(i);
        }
        if !is_vip && seat.is_vip && regular_in_vip_seat.is_none() {
            regular_in_vip_seat = Some(i);
        }
        if vip_in_regular_seat.is_some() && regular_in_vip_seat.is_some() {
            break;
        }
    }
    match (vip_in_regular_seat, regular_in_vip_seat) {
        (Some(a), Some(b)) => Some((a, b)),
        _ => None,
    }
}

fn find_cohesion_weak_area(
    assignment: &Assignment,
    venue: &Venue,
    idx: &AttendeeIndex,
) -> Option<(usize, usize)> {
    let mut group_keys: Vec<&String> = idx.groups.keys().collect();
    group_keys.sort();

    for key in group_keys {
        let members = &idx.groups[key];
        if members.len() < 2 {
            continue;
        }
        let member_set: HashSet<usize> = members.iter().copied().collect();
        for &m in members {
            let has_near_neighbor = members
                .iter()
                .any(|&other| other != m && venue.manhattan(assignment[m], assignment[other]) <= 2);
            if has_near_neighbor {
                continue;
            }
            for &g in members {
                for k in 0..idx.len() {
                    if member_set.contains(&k) {
                        continue;
                    }
                    if venue.manhattan(assignment[k], assignment[g]) == 1 {
                        return Some((m, k));
                    }
                }
            }
        }
    }
    None
}
