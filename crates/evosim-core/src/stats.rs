//! Population statistics recorded at each generation turnover.
//!
//! `score` and `average_speed` are running totals: each turnover adds the
//! new generation's mean to what is already there and nothing ever resets
//! them. `spike_percentage` is overwritten with the newest generation's
//! value.

use serde::Serialize;

use crate::population::Population;

/// Generation counter and aggregate statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationStats {
    /// Current generation, starting at 1.
    pub generation: u64,
    /// Sum over turnovers of the new generation's mean agility.
    pub score: f64,
    /// Sum over turnovers of the new generation's mean `|(vx + vy) / 2|`.
    pub average_speed: f64,
    /// Percentage of the latest generation carrying spikes.
    pub spike_percentage: f64,
}

impl Default for GenerationStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationStats {
    /// Stats for the initial, seeded generation.
    pub const fn new() -> Self {
        Self {
            generation: 1,
            score: 0.0,
            average_speed: 0.0,
            spike_percentage: 0.0,
        }
    }

    /// Count a turnover and fold in the freshly bred population.
    ///
    /// An empty population only advances the generation counter.
    #[allow(clippy::cast_precision_loss)]
    pub fn record_turnover(&mut self, population: &Population) {
        self.generation = self.generation.saturating_add(1);

        let size = population.len() as f64;
        if population.is_empty() {
            return;
        }

        let mut agility_sum = 0.0;
        let mut speed_sum = 0.0;
        let mut spiked: usize = 0;
        for creature in population {
            agility_sum += creature.agility;
            speed_sum += creature.velocity.mean_component().abs();
            if creature.spikes {
                spiked = spiked.saturating_add(1);
            }
        }

        self.score += agility_sum / size;
        self.average_speed += speed_sum / size;
        self.spike_percentage = spiked as f64 / size * 100.0;
    }

    /// The three heads-up lines drawn in the top-left corner.
    pub fn hud_lines(&self) -> [String; 3] {
        [
            format!("Generation: {}", self.generation),
            format!("Average Pop Speed: {:.2}", self.average_speed),
            format!("Spike %: {:.2}", self.spike_percentage),
        ]
    }
}

#[cfg(test)]
mod tests {
    use evosim_agents::Creature;
    use evosim_types::Vec2;

    use super::*;

    fn population(members: &[(f64, Vec2, bool)]) -> Population {
        Population::from_creatures(
            members
                .iter()
                .map(|&(agility, velocity, spikes)| Creature {
                    position: Vec2::ZERO,
                    velocity,
                    agility,
                    age: 10,
                    spikes,
                    alive: true,
                    direction_change_countdown: 5,
                })
                .collect(),
        )
    }

    #[test]
    fn starts_at_generation_one_with_zeroed_stats() {
        let stats = GenerationStats::new();
        assert_eq!(stats.generation, 1);
        assert!(stats.score.abs() < f64::EPSILON);
        assert!(stats.average_speed.abs() < f64::EPSILON);
        assert!(stats.spike_percentage.abs() < f64::EPSILON);
    }

    #[test]
    fn turnover_records_means_and_spike_share() {
        let mut stats = GenerationStats::new();
        stats.record_turnover(&population(&[
            (2.0, Vec2::new(4.0, 2.0), true),
            (4.0, Vec2::new(-4.0, -2.0), false),
        ]));

        assert_eq!(stats.generation, 2);
        assert!((stats.score - 3.0).abs() < 1e-12);
        assert!((stats.average_speed - 3.0).abs() < 1e-12);
        assert!((stats.spike_percentage - 50.0).abs() < 1e-12);
    }

    #[test]
    fn score_and_speed_accumulate_across_turnovers() {
        let mut stats = GenerationStats::new();
        let generation = population(&[(2.0, Vec2::new(1.0, 1.0), false)]);
        stats.record_turnover(&generation);
        stats.record_turnover(&generation);
        stats.record_turnover(&generation);

        assert_eq!(stats.generation, 4);
        assert!((stats.score - 6.0).abs() < 1e-12);
        assert!((stats.average_speed - 3.0).abs() < 1e-12);
    }

    #[test]
    fn spike_percentage_is_recomputed_each_turnover() {
        let mut stats = GenerationStats::new();
        stats.record_turnover(&population(&[
            (1.0, Vec2::ZERO, true),
            (1.0, Vec2::ZERO, true),
            (1.0, Vec2::ZERO, true),
        ]));
        assert!((stats.spike_percentage - 100.0).abs() < f64::EPSILON);

        stats.record_turnover(&population(&[
            (1.0, Vec2::ZERO, false),
            (1.0, Vec2::ZERO, false),
            (1.0, Vec2::ZERO, false),
        ]));
        assert!(stats.spike_percentage.abs() < f64::EPSILON);
    }

    #[test]
    fn stats_serialize_as_flat_json() {
        let mut stats = GenerationStats::new();
        stats.record_turnover(&population(&[(3.0, Vec2::new(2.0, 0.0), true)]));

        let json = serde_json::to_value(&stats);
        assert!(json.is_ok());
        let json = json.unwrap_or_default();
        assert_eq!(json.get("generation"), Some(&serde_json::json!(2)));
        assert_eq!(json.get("score"), Some(&serde_json::json!(3.0)));
        assert_eq!(json.get("average_speed"), Some(&serde_json::json!(1.0)));
        assert_eq!(json.get("spike_percentage"), Some(&serde_json::json!(100.0)));
    }

    #[test]
    fn hud_lines_use_two_decimals() {
        let stats = GenerationStats {
            generation: 7,
            score: 1.0,
            average_speed: 12.346,
            spike_percentage: 100.0 / 3.0,
        };
        let [generation, speed, spikes] = stats.hud_lines();
        assert_eq!(generation, "Generation: 7");
        assert_eq!(speed, "Average Pop Speed: 12.35");
        assert_eq!(spikes, "Spike %: 33.33");
    }
}
