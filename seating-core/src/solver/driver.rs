//! Optimization driver (C7): mode selection, population lifecycle, elitism,
//! progress reporting, cancellation, and the final simulated-annealing
//! polish.

use crate::attendees::AttendeeIndex;
use crate::models::{
    Assignment, CompleteCallback, FitnessRecord, OptimizationResult, OptimizerConfig,
    ProgressCallback, ProgressUpdate, SeatingError, Weights,
};
use crate::solver::construction::{greedy_assignment, random_assignment};
use crate::solver::display::ScoreBreakdown;
use crate::solver::moves::{crossover, improve_friend_proximity, improve_vip_placement, mutate, tournament_select};
use crate::solver::sa::SimulatedAnnealing;
use crate::solver::scoring::fitness;
use crate::venue::Venue;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};

/// Runs the full GA + SA pipeline and returns the best assignment found, its
/// fitness, and the per-generation best-fitness trace.
pub fn run<R: Rng>(
    venue: &Venue,
    idx: &AttendeeIndex,
    config: &OptimizerConfig,
    cancel: &AtomicBool,
    progress_cb: Option<&ProgressCallback>,
    complete_cb: Option<&CompleteCallback>,
    rng: &mut R,
) -> Result<OptimizationResult, SeatingError> {
    let weights = config.weights;
    weights.validate()?;

    let n = idx.len();
    if n > venue.capacity() {
        return Err(SeatingError::Config(format!(
            "{n} attendees exceed venue capacity {}",
            venue.capacity()
        )));
    }

    let (total_generations, sa_iterations) = config.mode.budget(config.generations);
    let pop_size = (config.population_size as usize).max(1);

    let mut population = initial_population(venue, idx, pop_size, n, rng);
    let mut evaluated = evaluate_all(&population, venue, idx, &weights)?;

    let mut global_best = best_of(&evaluated);
    let mut history = vec![global_best.1.total];

    for gen in 0..total_generations {
        if cancel.load(Ordering::SeqCst) {
            break;
        }

        evaluated.sort_by(|a, b| b.1.total.partial_cmp(&a.1.total).unwrap());

        let elite_count = (config.elitism_count as usize).min(evaluated.len());
        let mut next_population: Vec<Assignment> =
            evaluated[..elite_count].iter().map(|(a, _)| a.clone()).collect();

        while next_population.len() < pop_size {
            let parent1 = tournament_select(&evaluated, (config.tournament_size as usize).max(1), rng);
            let parent2 = tournament_select(&evaluated, (config.tournament_size as usize).max(1), rng);
            let (mut child1, mut child2) = crossover(&parent1, &parent2, config.crossover_rate, rng);

            mutate(&mut child1, config.mutation_rate, gen, rng);
            mutate(&mut child2, config.mutation_rate, gen, rng);

            if rng.random_bool(0.3) {
                smart_mutate(&mut child1, venue, idx, &weights)?;
            }

            next_population.push(child1);
            if next_population.len() < pop_size {
                next_population.push(child2);
            }
        }

        population = next_population;
        evaluated = evaluate_all(&population, venue, idx, &weights)?;

        let generation_best = best_of(&evaluated);
        if generation_best.1.total > global_best.1.total {
            global_best = generation_best;
        }
        history.push(global_best.1.total);

        if let Some(cb) = progress_cb {
            cb(&ProgressUpdate {
                generation: gen + 1,
                total_generations,
                best_fitness: global_best.1.total,
                progress: (gen + 1) as f64 / total_generations.max(1) as f64,
            });
        }

        if let Some(freq) = config.logging.log_frequency {
            if freq > 0 && (gen + 1) % freq == 0 {
                log::debug!(
                    "generation {}/{}: best_total={:.4}",
                    gen + 1,
                    total_generations,
                    global_best.1.total
                );
            }
        }

        if (gen + 1) % 5 == 0 {
            std::thread::yield_now();
        }
    }

    if !cancel.load(Ordering::SeqCst) {
        let sa = SimulatedAnnealing::new(config.initial_temp, config.cooling_rate, config.min_temp, sa_iterations);
        let (polished, polished_fitness) =
            sa.run(global_best.0.clone(), global_best.1, venue, idx, &weights, rng)?;
        if polished_fitness.total > global_best.1.total {
            global_best = (polished, polished_fitness);
            *history.last_mut().unwrap() = global_best.1.total;
        }
    }

    log::debug!(
        "optimize finished: generations_run={}, best_total={:.4}",
        history.len().saturating_sub(1),
        global_best.1.total
    );

    if config.logging.log_final_score_breakdown {
        log::info!("{}", ScoreBreakdown(&global_best.1));
    }

    let result = OptimizationResult {
        solution: global_best.0,
        fitness: global_best.1,
        history,
    };

    if let Some(cb) = complete_cb {
        cb(&result);
    }

    Ok(result)
}

fn initial_population<R: Rng>(
    venue: &Venue,
    idx: &AttendeeIndex,
    pop_size: usize,
    n: usize,
    rng: &mut R,
) -> Vec<Assignment> {
    let greedy_count = ((pop_size as f64) * 0.2).floor() as usize;
    let mut population = Vec::with_capacity(pop_size);

    for _ in 0..greedy_count.min(pop_size) {
        let mut individual = greedy_assignment(venue, idx);
        for _ in 0..5 {
            perturb_with_one_swap(&mut individual, rng);
        }
        population.push(individual);
    }
    while population.len() < pop_size {
        population.push(random_assignment(venue, n, rng));
    }
    population
}

fn perturb_with_one_swap<R: Rng>(assignment: &mut Assignment, rng: &mut R) {
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

fn evaluate_all(
    population: &[Assignment],
    venue: &Venue,
    idx: &AttendeeIndex,
    weights: &Weights,
) -> Result<Vec<(Assignment, FitnessRecord)>, SeatingError> {
    population
        .iter()
        .map(|a| fitness(a, venue, idx, weights).map(|f| (a.clone(), f)))
        .collect()
}

fn best_of(evaluated: &[(Assignment, FitnessRecord)]) -> (Assignment, FitnessRecord) {
    evaluated
        .iter()
        .max_by(|a, b| a.1.total.partial_cmp(&b.1.total).unwrap())
        .cloned()
        .expect("population must not be empty")
}

/// Applies at most one targeted swap: `improve_friend_proximity` if
/// `friend_proximity < 0.7`, else `improve_vip_placement` if
/// `vip_placement < 0.8`. The fitness used for both checks is computed once
/// per individual per generation, before either swap.
fn smart_mutate(
    child: &mut Assignment,
    venue: &Venue,
    idx: &AttendeeIndex,
    weights: &Weights,
) -> Result<(), SeatingError> {
    let current = fitness(child, venue, idx, weights)?;
    if current.friend_proximity < 0.7 && improve_friend_proximity(child, venue, idx) {
        return Ok(());
    }
    if current.vip_placement < 0.8 {
        improve_vip_placement(child, venue, idx);
    }
    Ok(())
}
