//! One logical tick of the simulation.
//!
//! A tick runs to completion before the next one starts:
//!
//! 1. **Move** -- every living creature takes one [`step`].
//! 2. **Turnover** -- if that left the whole population dead, breed a new
//!    generation with [`evolve`], adopt it, and fold it into the
//!    [`GenerationStats`].
//!
//! Pacing, rendering, and the quit signal belong to the
//! [`runner`](crate::runner); `run_tick` itself never blocks.
//!
//! [`step`]: evosim_agents::Creature::step

use evosim_agents::{CreatureConfig, RandomSource, SeededRandom};
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::evolution::{self, EvolutionError, EvolutionParams};
use crate::population::Population;
use crate::stats::GenerationStats;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// Breeding the next generation failed.
    #[error("evolution error at tick {tick}: {source}")]
    Evolution {
        /// Tick during which the turnover was attempted.
        tick: u64,
        /// The underlying evolution error.
        source: EvolutionError,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed (first tick is 1).
    pub tick: u64,
    /// Generation counter after the tick.
    pub generation: u64,
    /// Creatures that died during the move phase.
    pub deaths: usize,
    /// Living creatures at the end of the tick.
    pub agents_alive: usize,
    /// The population was replaced during this tick.
    pub turnover: bool,
}

/// The mutable simulation state passed through the tick cycle.
///
/// The population is owned here and nowhere else.
pub struct SimulationState {
    /// Ticks executed so far.
    pub tick: u64,
    /// The current generation.
    pub population: Population,
    /// Generation counter and aggregate statistics.
    pub stats: GenerationStats,
    /// Creature movement and lifecycle tunables.
    pub creature_config: CreatureConfig,
    /// Genetic algorithm parameters.
    pub evolution: EvolutionParams,
    /// Every random draw of the run comes from here.
    pub rng: Box<dyn RandomSource + Send>,
}

impl std::fmt::Debug for SimulationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationState")
            .field("tick", &self.tick)
            .field("population", &self.population)
            .field("stats", &self.stats)
            .field("creature_config", &self.creature_config)
            .field("evolution", &self.evolution)
            .finish_non_exhaustive()
    }
}

impl SimulationState {
    /// Seed a fresh run from configuration, using `world.seed`.
    pub fn new(config: &SimulationConfig) -> Self {
        Self::with_random(config, Box::new(SeededRandom::new(config.world.seed)))
    }

    /// Seed a fresh run drawing from an injected random source.
    pub fn with_random(config: &SimulationConfig, mut rng: Box<dyn RandomSource + Send>) -> Self {
        let creature_config = config.creature_config();
        let evolution = config.evolution_params();
        let population = Population::seed(evolution.generation_size, &creature_config, &mut *rng);

        Self {
            tick: 0,
            population,
            stats: GenerationStats::new(),
            creature_config,
            evolution,
            rng,
        }
    }
}

/// Execute one complete tick of the simulation.
pub fn run_tick(state: &mut SimulationState) -> Result<TickSummary, TickError> {
    state.tick = state.tick.saturating_add(1);
    let tick = state.tick;

    // --- Move ---
    let deaths = state
        .population
        .step_all(&state.creature_config, &mut *state.rng);
    debug!(
        tick,
        deaths,
        alive = state.population.alive_count(),
        "Creatures moved"
    );

    // --- Turnover ---
    let turnover = state.population.all_dead();
    if turnover {
        let next = evolution::evolve(
            &state.population,
            &state.evolution,
            &state.creature_config,
            &mut *state.rng,
        )
        .map_err(|source| TickError::Evolution { tick, source })?;
        state.population = next;
        state.stats.record_turnover(&state.population);

        info!(
            tick,
            generation = state.stats.generation,
            score = state.stats.score,
            average_speed = state.stats.average_speed,
            spike_percentage = state.stats.spike_percentage,
            "Generation turnover"
        );
    }

    Ok(TickSummary {
        tick,
        generation: state.stats.generation,
        deaths,
        agents_alive: state.population.alive_count(),
        turnover,
    })
}
