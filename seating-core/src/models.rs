//! Data models and types for the seating optimizer API.
//!
//! This module contains the public data structures used to define venues,
//! attendees, optimization objectives and results. They are designed to be
//! serializable (JSON) for easy integration with callers that persist or
//! transport problems and solutions.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while configuring or running the optimizer.
///
/// `Config` covers problems detected synchronously at `optimize` entry
/// (unset venue, empty attendee list, more attendees than seats). `Weight`
/// covers a fitness weight configuration with no positive weight, which
/// would make `total` undefined.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeatingError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("weight error: {0}")]
    Weight(String),
}

/// A single seat in the venue, in row-major position `row * cols + col`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Seat {
    pub row: usize,
    pub col: usize,
    pub is_vip: bool,
    /// Euclidean distance from this seat to the virtual stage point, one row
    /// in front of row 0, centered on columns.
    pub distance_to_stage: f64,
}

/// The venue: a rectangular grid of seats, fixed once built.
///
/// Built by [`Venue::build`]; immutable for the duration of an optimization
/// call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub rows: usize,
    pub cols: usize,
    pub vip_rows: usize,
    pub(crate) seats: Vec<Seat>,
    /// Normalizing constant for stage-distance scoring: the distance from the
    /// farthest possible seat, `sqrt((rows+1)^2 + (cols/2)^2)`.
    pub(crate) max_venue_distance: f64,
}

impl Venue {
    /// Total seat capacity, `rows * cols`.
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    pub fn seat(&self, pos: usize) -> &Seat {
        &self.seats[pos]
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
}

/// The type of an attendee: whether they hold a VIP ticket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttendeeType {
    Vip,
    Regular,
}

impl Default for AttendeeType {
    fn default() -> Self {
        AttendeeType::Regular
    }
}

/// An attendee's stage-zone seating preference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Any,
    Front,
    Middle,
    Back,
}

impl Default for Preference {
    fn default() -> Self {
        Preference::Any
    }
}

fn default_priority() -> u8 {
    5
}

/// A single attendee to be seated.
///
/// `id` is optional on input; [`crate::attendees::AttendeeIndex::build`] fills
/// in the 0-based attendee index as a string id when absent, per the stable
/// attendee index contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendee {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: AttendeeType,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub preference: Preference,
    #[serde(default = "default_priority")]
    pub priority: u8,
}

impl Default for Attendee {
    fn default() -> Self {
        Attendee {
            id: None,
            kind: AttendeeType::Regular,
            group: None,
            preference: Preference::Any,
            priority: default_priority(),
        }
    }
}

/// An assignment (chromosome): `solution[i]` is the seat position occupied by
/// attendee `i`. Must be a permutation of `N` distinct seat positions drawn
/// from `[0, rows*cols)`.
pub type Assignment = Vec<usize>;

/// Five real numbers in `[0, 1]` describing how well an assignment satisfies
/// the four soft constraints, and their weighted total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct FitnessRecord {
    pub friend_proximity: f64,
    pub vip_placement: f64,
    pub group_cohesion: f64,
    pub stage_distance: f64,
    pub total: f64,
}

/// Normalized weights for the four fitness sub-scores. Constructed via
/// [`Weights::new`], which rejects the all-zero case (`SeatingError::Weight`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weights {
    pub friend: f64,
    pub vip: f64,
    pub group: f64,
    pub distance: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            friend: 1.0,
            vip: 1.0,
            group: 1.0,
            distance: 1.0,
        }
    }
}

impl Weights {
    /// Validates that at least one weight is positive. Does not normalize:
    /// normalization (dividing by the sum) happens at the point of use in the
    /// fitness evaluator so the raw weights remain inspectable.
    pub fn validate(&self) -> Result<(), SeatingError> {
        let sum = self.friend + self.vip + self.group + self.distance;
        if sum <= 0.0 {
            return Err(SeatingError::Weight(
                "at least one of the four weights must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn sum(&self) -> f64 {
        self.friend + self.vip + self.group + self.distance
    }
}

/// Optimization mode: bundles `(total_generations, sa_iterations)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Fast,
    Balanced,
    Thorough,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Balanced
    }
}

impl Mode {
    /// `(total_generations, sa_iterations)` for this mode. `generations` is
    /// only consulted for `Balanced`, where it defaults to 200 but may be
    /// overridden by `OptimizerConfig::generations`.
    pub(crate) fn budget(&self, balanced_generations: u32) -> (u32, u32) {
        match self {
            Mode::Fast => (50, 20),
            Mode::Balanced => (balanced_generations, 100),
            Mode::Thorough => (500, 200),
        }
    }
}

/// Logging verbosity knobs for the optimization driver: cheap
/// booleans/intervals threaded through configuration rather than a global
/// logger toggle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoggingOptions {
    /// Emit a `log::debug!` progress line every `log_frequency` generations.
    /// `None` disables per-generation logging.
    pub log_frequency: Option<u32>,
    /// Emit a `log::info!` score breakdown after the final SA polish.
    pub log_final_score_breakdown: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        LoggingOptions {
            log_frequency: Some(10),
            log_final_score_breakdown: true,
        }
    }
}

/// Full optimizer configuration. All fields default per spec §6.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub population_size: u32,
    pub generations: u32,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub elitism_count: u32,
    pub tournament_size: u32,
    pub initial_temp: f64,
    pub cooling_rate: f64,
    pub min_temp: f64,
    pub mode: Mode,
    pub weights: Weights,
    #[serde(default)]
    pub logging: LoggingOptions,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            population_size: 100,
            generations: 200,
            mutation_rate: 0.15,
            crossover_rate: 0.85,
            elitism_count: 5,
            tournament_size: 5,
            initial_temp: 1000.0,
            cooling_rate: 0.995,
            min_temp: 1.0,
            mode: Mode::Balanced,
            weights: Weights::default(),
            logging: LoggingOptions::default(),
        }
    }
}

/// A progress snapshot delivered to the caller's progress callback once per
/// generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub generation: u32,
    pub total_generations: u32,
    pub best_fitness: f64,
    pub progress: f64,
}

/// Caller-supplied progress observer: invoked once per generation.
/// Cancellation goes through [`crate::solver::Optimizer::stop`] instead of a
/// callback return value.
pub type ProgressCallback<'a> = dyn Fn(&ProgressUpdate) + 'a;

/// Caller-supplied completion observer: invoked once with the final
/// [`OptimizationResult`] before `optimize`/`optimize_with_rng` returns it.
/// Exists alongside the synchronous return value for callers that wire
/// completion handling through a callback rather than the call site, e.g.
/// host bindings that drive the optimizer from a non-Rust event loop.
pub type CompleteCallback<'a> = dyn Fn(&OptimizationResult) + 'a;

/// The result of a completed (or cancelled) optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub solution: Assignment,
    pub fitness: FitnessRecord,
    pub history: Vec<f64>,
}

/// One decoded seat assignment, suitable for display or ticket generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatAssignment {
    pub attendee_id: String,
    pub row: usize,
    pub col: usize,
    pub row_label: String,
    pub seat_number: usize,
    pub is_vip: bool,
    pub seat_id: String,
}

impl fmt::Display for SeatAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.attendee_id, self.seat_id)
    }
}
