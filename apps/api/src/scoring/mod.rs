// Deterministic-with-noise compatibility scoring.
// Pure computation: no I/O, no shared state.

pub mod blend;
pub mod heuristic;
pub mod personality;

pub use heuristic::{heuristic_score, heuristic_scores, ClockNoise, NoiseSource};
