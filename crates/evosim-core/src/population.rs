//! The ordered set of creatures making up one generation.
//!
//! A [`Population`] is never edited member by member between generations:
//! creatures die in place, and at turnover the whole population is swapped
//! for the one returned by [`evolve`](crate::evolution::evolve).

use evosim_agents::{Creature, CreatureConfig, RandomSource};

/// One generation of creatures, in a stable order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    creatures: Vec<Creature>,
}

impl Population {
    /// Build `size` creatures at random positions.
    pub fn seed(size: usize, config: &CreatureConfig, rng: &mut dyn RandomSource) -> Self {
        let creatures = (0..size)
            .map(|_| Creature::spawn_random(config, rng))
            .collect();
        Self { creatures }
    }

    /// Wrap an existing list of creatures.
    pub const fn from_creatures(creatures: Vec<Creature>) -> Self {
        Self { creatures }
    }

    /// Step every living creature once, in order. Returns how many died.
    pub fn step_all(&mut self, config: &CreatureConfig, rng: &mut dyn RandomSource) -> usize {
        let mut deaths: usize = 0;
        for creature in self.creatures.iter_mut().filter(|c| c.is_alive()) {
            if creature.step(config, rng).died {
                deaths = deaths.saturating_add(1);
            }
        }
        deaths
    }

    /// Whether every creature is dead. An empty population counts as dead.
    pub fn all_dead(&self) -> bool {
        self.creatures.iter().all(|c| !c.is_alive())
    }

    /// Number of creatures still alive.
    pub fn alive_count(&self) -> usize {
        self.creatures.iter().filter(|c| c.is_alive()).count()
    }

    /// Total number of creatures, dead or alive.
    pub const fn len(&self) -> usize {
        self.creatures.len()
    }

    /// Whether the population has no creatures at all.
    pub const fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Iterate over creatures in population order.
    pub fn iter(&self) -> std::slice::Iter<'_, Creature> {
        self.creatures.iter()
    }

    /// The creatures as a slice.
    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    /// Mutable access to the creatures, for tests and tooling.
    pub fn creatures_mut(&mut self) -> &mut [Creature] {
        &mut self.creatures
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Creature;
    type IntoIter = std::slice::Iter<'a, Creature>;

    fn into_iter(self) -> Self::IntoIter {
        self.creatures.iter()
    }
}

#[cfg(test)]
mod tests {
    use evosim_agents::SeededRandom;

    use super::*;

    #[test]
    fn seed_builds_requested_size_all_alive() {
        let config = CreatureConfig::default();
        let mut rng = SeededRandom::new(42);
        let population = Population::seed(30, &config, &mut rng);
        assert_eq!(population.len(), 30);
        assert_eq!(population.alive_count(), 30);
        assert!(!population.all_dead());
    }

    #[test]
    fn dead_creatures_are_not_stepped() {
        let config = CreatureConfig::default();
        let mut rng = SeededRandom::new(1);
        let mut population = Population::seed(3, &config, &mut rng);
        if let Some(first) = population.creatures_mut().first_mut() {
            first.alive = false;
        }
        let frozen = population.creatures().first().cloned();

        population.step_all(&config, &mut rng);

        assert_eq!(population.creatures().first().cloned(), frozen);
        assert!(frozen.is_some_and(|c| !c.alive));
        assert_eq!(population.len(), 3);
    }

    #[test]
    fn stepping_until_extinction_keeps_corpses() {
        let config = CreatureConfig::default();
        let mut rng = SeededRandom::new(9);
        let mut population = Population::seed(10, &config, &mut rng);

        let mut deaths: usize = 0;
        for _ in 0..50 {
            deaths = deaths.saturating_add(population.step_all(&config, &mut rng));
        }

        assert!(population.all_dead());
        assert_eq!(deaths, 10);
        assert_eq!(population.len(), 10);
        assert_eq!(population.alive_count(), 0);
    }

    #[test]
    fn empty_population_counts_as_dead() {
        assert!(Population::default().all_dead());
        assert!(Population::default().is_empty());
    }
}
