//! Creature state, movement, and lifecycle for the evosim simulation.
//!
//! Everything that operates on a single creature without knowing about the
//! rest of the population lives here. Population-level logic (evolution,
//! statistics, the tick loop) lives in `evosim-core`.
//!
//! # Modules
//!
//! - [`config`] -- Movement and lifecycle tunables ([`CreatureConfig`])
//! - [`creature`] -- The [`Creature`] itself and its per-tick [`Creature::step`]
//! - [`random`] -- The injectable [`RandomSource`] and its seeded implementation

pub mod config;
pub mod creature;
pub mod random;

pub use config::{AgeRange, CreatureConfig, TraitRange};
pub use creature::{Creature, StepResult, random_velocity};
pub use random::{RandomSource, SeededRandom};
