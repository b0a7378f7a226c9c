//! Generational replacement: fitness ranking, elitism, crossover, mutation.
//!
//! When a generation has died out, [`evolve`] ranks it by [`fitness`], keeps
//! the top [`EvolutionParams::elite_percent`] as the breeding pool, and fills
//! a brand-new population with offspring of pool members.
//!
//! Offspring never blend their parents. A crossover coin picks which single
//! parent hands down `agility`, `age` and `spikes`; position, velocity and
//! the re-heading countdown are always fresh. A second coin may then mutate
//! the inherited traits.

use evosim_agents::{Creature, CreatureConfig, RandomSource};
use tracing::debug;

use crate::population::Population;

/// Errors raised by [`evolve`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvolutionError {
    /// The elitism cutoff left nobody to breed from.
    #[error(
        "empty breeding pool: {population_size} creatures at a {elite_percent}% cutoff select no parents"
    )]
    EmptyBreedingPool {
        /// Size of the population being evolved.
        population_size: usize,
        /// Cutoff that was applied.
        elite_percent: usize,
    },
}

/// Parameters of the genetic algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionParams {
    /// Number of offspring produced per turnover (default: 30).
    pub generation_size: usize,
    /// Share of the ranked population that may breed, in percent (default: 20).
    pub elite_percent: usize,
    /// Probability that a child is mutated (default: 0.1).
    pub mutation_rate: f64,
    /// Probability that a child inherits from its second parent (default: 0.5).
    pub crossover_rate: f64,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            generation_size: 30,
            elite_percent: 20,
            mutation_rate: 0.1,
            crossover_rate: 0.5,
        }
    }
}

/// A child together with how it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Offspring {
    /// The new creature.
    pub creature: Creature,
    /// Index of the first parent in the breeding pool.
    pub first_parent: usize,
    /// Index of the second parent in the breeding pool (may equal the first).
    pub second_parent: usize,
    /// The crossover coin succeeded, so traits came from the second parent.
    pub from_second_parent: bool,
    /// The mutation coin succeeded.
    pub mutated: bool,
}

impl Offspring {
    /// Pool index of the parent whose traits were inherited.
    pub const fn donor(&self) -> usize {
        if self.from_second_parent {
            self.second_parent
        } else {
            self.first_parent
        }
    }
}

/// Selection score: `agility + spikes + velocity.y + velocity.x`.
///
/// Velocity enters signed, so moving right or down scores higher than
/// moving left or up at the same speed.
pub const fn fitness(creature: &Creature) -> f64 {
    creature.agility + creature.spike_value() + creature.velocity.y + creature.velocity.x
}

/// Number of top-ranked creatures kept for breeding: `floor(len * percent / 100)`.
pub const fn breeding_pool_size(population_size: usize, elite_percent: usize) -> usize {
    match population_size.saturating_mul(elite_percent).checked_div(100) {
        Some(size) => size,
        None => 0,
    }
}

/// Creatures ordered by descending [`fitness`].
///
/// Uses a total order, so ties and NaN traits cannot break the sort.
pub fn rank(population: &Population) -> Vec<&Creature> {
    let mut ranked: Vec<(f64, &Creature)> = population.iter().map(|c| (fitness(c), c)).collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked.into_iter().map(|(_, c)| c).collect()
}

/// The top `elite_percent` of the population by [`fitness`], best first.
pub fn breeding_pool(population: &Population, elite_percent: usize) -> Vec<&Creature> {
    let mut ranked = rank(population);
    ranked.truncate(breeding_pool_size(population.len(), elite_percent));
    ranked
}

/// Produce `params.generation_size` offspring from `pool`.
///
/// Per child the draws are: first parent, second parent, crossover coin,
/// the ordinary random constructor, mutation coin and, when mutating, the
/// agility and age offsets.
pub fn breed(
    pool: &[&Creature],
    params: &EvolutionParams,
    config: &CreatureConfig,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Offspring>, EvolutionError> {
    let empty = || EvolutionError::EmptyBreedingPool {
        population_size: pool.len(),
        elite_percent: params.elite_percent,
    };

    let mut offspring = Vec::with_capacity(params.generation_size);
    while offspring.len() < params.generation_size {
        let first_parent = rng.pick_index(pool.len()).ok_or_else(empty)?;
        let second_parent = rng.pick_index(pool.len()).ok_or_else(empty)?;
        let (Some(parent_a), Some(parent_b)) = (pool.get(first_parent), pool.get(second_parent))
        else {
            return Err(empty());
        };

        let from_second_parent = rng.chance(params.crossover_rate);
        let donor = if from_second_parent { parent_b } else { parent_a };

        let mut creature = Creature::spawn_random(config, rng);
        creature.agility = donor.agility;
        creature.age = donor.age;
        creature.spikes = donor.spikes;

        let mutated = rng.chance(params.mutation_rate);
        if mutated {
            creature.agility += rng.uniform(-1.0, 1.0);
            creature.age = creature.age.saturating_add(rng.int_range(-1, 2));
            creature.spikes = !creature.spikes;
        }

        offspring.push(Offspring {
            creature,
            first_parent,
            second_parent,
            from_second_parent,
            mutated,
        });
    }

    Ok(offspring)
}

/// Replace a dead generation with a new one.
///
/// The input is only read; the caller adopts the returned population and
/// drops the old one.
pub fn evolve(
    population: &Population,
    params: &EvolutionParams,
    config: &CreatureConfig,
    rng: &mut dyn RandomSource,
) -> Result<Population, EvolutionError> {
    let pool = breeding_pool(population, params.elite_percent);
    if pool.is_empty() {
        return Err(EvolutionError::EmptyBreedingPool {
            population_size: population.len(),
            elite_percent: params.elite_percent,
        });
    }

    let offspring = breed(&pool, params, config, rng)?;

    debug!(
        pool_size = pool.len(),
        best_fitness = pool.first().map(|c| fitness(c)),
        cutoff_fitness = pool.last().map(|c| fitness(c)),
        mutated = offspring.iter().filter(|o| o.mutated).count(),
        "Generation bred"
    );

    Ok(Population::from_creatures(
        offspring.into_iter().map(|o| o.creature).collect(),
    ))
}
