//! Flappy game simulation.
//!
//! The bird falls under gravity and is kicked upward on every click. Three pipe
//! pairs scroll left; a pair leaving the canvas scores a point and is recycled
//! to the back, and touching a pipe outside its gap ends the run.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
