//! Population, evolution, statistics, and the tick loop for evosim.
//!
//! This crate owns everything above a single creature: the generation that
//! is alive right now, the genetic algorithm that replaces it when it dies
//! out, the running statistics, and the loop that paces it all.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `evosim-config.yaml` into
//!   strongly-typed structs.
//! - [`evolution`] -- Fitness, breeding pool selection, crossover, mutation.
//! - [`frame`] -- [`FrameRenderer`] contract and frame snapshots.
//! - [`operator`] -- Quit signal, pacing, and run bounds.
//! - [`population`] -- The [`Population`] of one generation.
//! - [`runner`] -- The async loop driving ticks until a stop condition.
//! - [`stats`] -- [`GenerationStats`] recorded at each turnover.
//! - [`tick`] -- [`SimulationState`] and the single-tick [`run_tick`].
//!
//! [`FrameRenderer`]: frame::FrameRenderer
//! [`Population`]: population::Population
//! [`GenerationStats`]: stats::GenerationStats
//! [`SimulationState`]: tick::SimulationState
//! [`run_tick`]: tick::run_tick

pub mod config;
pub mod evolution;
pub mod frame;
pub mod operator;
pub mod population;
pub mod runner;
pub mod stats;
pub mod tick;
