//! The public `Optimizer`: owns venue, attendee index, and configuration,
//! and exposes the external API contract from spec §6 (`configure`,
//! `set_venue`, `set_attendees`, `update_weights`, `set_mode`, `optimize`,
//! `stop`, `seating_plan`).

pub mod construction;
pub mod display;
pub mod driver;
pub mod moves;
#[cfg(test)]
mod proptests;
pub mod sa;
pub mod scoring;
pub mod validation;

use crate::attendees::AttendeeIndex;
use crate::models::{
    Assignment, CompleteCallback, Mode, OptimizationResult, OptimizerConfig, ProgressCallback,
    SeatAssignment, SeatingError, Weights,
};
use crate::venue::Venue;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Owns the venue, the preprocessed attendee index, and the solver
/// configuration for one optimization problem. Each instance owns its own
/// mutable state (population, RNG, cancellation flag); there is no
/// process-global mutable state, so callers may run independent `Optimizer`s
/// concurrently as long as each instance is only driven from one thread at a
/// time.
pub struct Optimizer {
    venue: Option<Venue>,
    attendees: Option<AttendeeIndex>,
    config: OptimizerConfig,
    cancel: Arc<AtomicBool>,
    last_result: Option<OptimizationResult>,
}

impl Default for Optimizer {
    fn default() -> Self {
        Optimizer::new()
    }
}

impl Optimizer {
    pub fn new() -> Self {
        Optimizer {
            venue: None,
            attendees: None,
            config: OptimizerConfig::default(),
            cancel: Arc::new(AtomicBool::new(false)),
            last_result: None,
        }
    }

    /// Replaces the solver configuration wholesale. Validates the weights
    /// eagerly so a bad configuration is reported before `optimize` is ever
    /// called.
    pub fn configure(&mut self, config: OptimizerConfig) -> Result<(), SeatingError> {
        config.weights.validate()?;
        self.config = config;
        Ok(())
    }

    /// Builds the seat table (C1).
    pub fn set_venue(&mut self, rows: usize, cols: usize, vip_rows: usize) -> Result<(), SeatingError> {
        self.venue = Some(Venue::build(rows, cols, vip_rows)?);
        Ok(())
    }

    /// Builds the attendee index (C2).
    pub fn set_attendees(&mut self, attendees: Vec<crate::models::Attendee>) -> Result<(), SeatingError> {
        self.attendees = Some(AttendeeIndex::build(attendees)?);
        Ok(())
    }

    /// Re-normalizes the four fitness weights. Raises `SeatingError::Weight`
    /// if all four are zero.
    pub fn update_weights(
        &mut self,
        friend: f64,
        vip: f64,
        group: f64,
        distance: f64,
    ) -> Result<(), SeatingError> {
        let weights = Weights {
            friend,
            vip,
            group,
            distance,
        };
        weights.validate()?;
        self.config.weights = weights;
        Ok(())
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.config.mode = mode;
    }

    /// Requests cooperative cancellation of any in-progress `optimize` call.
    /// The flag is checked at generation boundaries; an in-progress
    /// generation always runs to completion, and the final SA polish is
    /// skipped once cancellation is observed.
    pub fn stop(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    /// Runs the full GA + SA pipeline using a thread-local RNG.
    pub fn optimize(
        &mut self,
        progress_cb: Option<&ProgressCallback>,
        complete_cb: Option<&CompleteCallback>,
    ) -> Result<OptimizationResult, SeatingError> {
        let mut rng = rand::rng();
        self.optimize_with_rng(progress_cb, complete_cb, &mut rng)
    }

    /// Runs the full GA + SA pipeline with an injectable RNG, so callers can
    /// get reproducible runs (spec §8, testable property 7) by supplying a
    /// seeded generator such as `rand_chacha::ChaCha8Rng`. Stores the result
    /// on success so a later `seating_plan(None)` call can decode it.
    pub fn optimize_with_rng<R: rand::Rng>(
        &mut self,
        progress_cb: Option<&ProgressCallback>,
        complete_cb: Option<&CompleteCallback>,
        rng: &mut R,
    ) -> Result<OptimizationResult, SeatingError> {
        let venue = self
            .venue
            .as_ref()
            .ok_or_else(|| SeatingError::Config("venue is not set".to_string()))?;
        let attendees = self
            .attendees
            .as_ref()
            .ok_or_else(|| SeatingError::Config("attendee list is not set".to_string()))?;

        self.cancel.store(false, Ordering::SeqCst);
        let result = driver::run(venue, attendees, &self.config, &self.cancel, progress_cb, complete_cb, rng)?;
        self.last_result = Some(result.clone());
        Ok(result)
    }

    /// Decodes `solution` into display rows, or, when `solution` is `None`,
    /// decodes the solution of the last successful `optimize`/`optimize_with_rng`
    /// call. `seat_id` follows the external contract: row letter (`'A' +
    /// row`, wrapping past `Z`) followed by the 1-based column number.
    pub fn seating_plan(
        &self,
        solution: Option<&Assignment>,
    ) -> Result<Vec<SeatAssignment>, SeatingError> {
        let venue = self
            .venue
            .as_ref()
            .ok_or_else(|| SeatingError::Config("venue is not set".to_string()))?;
        let attendees = self
            .attendees
            .as_ref()
            .ok_or_else(|| SeatingError::Config("attendee list is not set".to_string()))?;
        let solution = solution
            .or_else(|| self.last_result.as_ref().map(|r| &r.solution))
            .ok_or_else(|| {
                SeatingError::Config("no solution given and no prior optimize result to decode".to_string())
            })?;

        validation::validate_assignment(solution, venue)?;
        if solution.len() != attendees.len() {
            return Err(SeatingError::Config(format!(
                "solution has {} entries but there are {} attendees",
                solution.len(),
                attendees.len()
            )));
        }

        let mut plan = Vec::with_capacity(solution.len());
        for (i, &pos) in solution.iter().enumerate() {
            let seat = venue.seat(pos);
            let row_label = row_label(seat.row);
            let seat_number = seat.col + 1;
            plan.push(SeatAssignment {
                attendee_id: attendees.attendees[i]
                    .id
                    .clone()
                    .unwrap_or_else(|| i.to_string()),
                row: seat.row,
                col: seat.col,
                row_label: row_label.clone(),
                seat_number,
                is_vip: seat.is_vip,
                seat_id: format!("{row_label}{seat_number}"),
            });
        }
        Ok(plan)
    }
}

/// `'A' + row`, wrapping every 26 rows into a repeated-letter spreadsheet
/// style (`Z`, `AA`, `AB`, ...) for venues taller than the alphabet.
fn row_label(row: usize) -> String {
    let mut n = row;
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}
