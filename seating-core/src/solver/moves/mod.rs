//! Genetic operators (C5): tournament selection, order-preserving crossover,
//! swap/block mutation, and the targeted "smart" mutations.

mod crossover;
mod mutation;
mod selection;
mod smart;

pub use crossover::crossover;
pub use mutation::mutate;
pub use selection::tournament_select;
pub use smart::{improve_friend_proximity, improve_vip_placement};
