//! # seating-core
//!
//! A hybrid genetic-algorithm + simulated-annealing optimizer for assigning
//! event attendees to venue seats.
//!
//! An assignment is scored by a pure fitness evaluator that combines four
//! normalized sub-scores (friend proximity, VIP placement, group cohesion,
//! and priority-weighted stage distance) into a single weighted total in
//! `[0, 1]`. The [`solver::Optimizer`] drives a generational search (tournament
//! selection, order-preserving crossover, swap/block mutation, and targeted
//! "smart" mutations) followed by a simulated-annealing polish pass, with
//! cooperative cancellation and optional per-generation progress reporting.
//!
//! ```no_run
//! use seating_core::models::{Attendee, AttendeeType, OptimizerConfig};
//! use seating_core::solver::Optimizer;
//!
//! let mut optimizer = Optimizer::new();
//! optimizer.set_venue(10, 12, 2).unwrap();
//! optimizer
//!     .set_attendees(vec![
//!         Attendee {
//!             kind: AttendeeType::Vip,
//!             ..Default::default()
//!         },
//!         Attendee::default(),
//!     ])
//!     .unwrap();
//! optimizer.configure(OptimizerConfig::default()).unwrap();
//!
//! let result = optimizer.optimize(None, None).unwrap();
//! let plan = optimizer.seating_plan(Some(&result.solution)).unwrap();
//! for row in plan {
//!     println!("{row}");
//! }
//! ```

pub mod attendees;
pub mod models;
pub mod solver;
pub mod venue;

pub use models::SeatingError;
pub use solver::Optimizer;
