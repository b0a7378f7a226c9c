//! Configuration loading and typed config structures for evosim.
//!
//! The canonical configuration lives in `evosim-config.yaml` at the project
//! root. Every section and field is optional; anything left out falls back
//! to the defaults below, which reproduce the classic 1350x650 screen with
//! 30 creatures per generation.

use std::path::Path;

use evosim_agents::CreatureConfig;
use serde::Deserialize;

use crate::evolution::{self, EvolutionParams};

/// Environment variable that overrides `world.seed`.
pub const SEED_ENV_VAR: &str = "EVOSIM_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The values parsed but describe a simulation that cannot run.
    #[error("invalid config: {reason}")]
    Invalid {
        /// Which constraint was violated.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `evosim-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Screen, seed, and pacing.
    #[serde(default)]
    pub world: WorldConfig,

    /// Creature movement parameters.
    #[serde(default)]
    pub creatures: CreaturesConfig,

    /// Genetic algorithm parameters.
    #[serde(default)]
    pub evolution: EvolutionConfig,

    /// Run boundaries.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Presentation selection.
    #[serde(default)]
    pub render: RenderConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load and validate configuration from a YAML file at the given path.
    ///
    /// `EVOSIM_SEED`, when set to an integer, overrides `world.seed`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.world.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid {
                reason: reason.to_owned(),
            })
        };

        if self.world.screen_width == 0 || self.world.screen_height == 0 {
            return invalid("screen dimensions must be positive");
        }
        if !(self.creatures.max_speed.is_finite() && self.creatures.max_speed > 0.0) {
            return invalid("creatures.max_speed must be a positive number");
        }
        if self.creatures.change_direction_interval <= 0 {
            return invalid("creatures.change_direction_interval must be positive");
        }
        if !(self.creatures.body_size.is_finite() && self.creatures.body_size >= 0.0) {
            return invalid("creatures.body_size must be a non-negative number");
        }
        if !(0.0..=1.0).contains(&self.evolution.mutation_rate) {
            return invalid("evolution.mutation_rate must be within [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.evolution.crossover_rate) {
            return invalid("evolution.crossover_rate must be within [0, 1]");
        }
        if self.evolution.elite_percent > 100 {
            return invalid("evolution.elite_percent must be at most 100");
        }
        let pool = evolution::breeding_pool_size(
            self.evolution.generation_size,
            self.evolution.elite_percent,
        );
        if pool == 0 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "generation_size {} with elite_percent {} leaves an empty breeding pool",
                    self.evolution.generation_size, self.evolution.elite_percent
                ),
            });
        }
        Ok(())
    }

    /// Creature tunables derived from the `world` and `creatures` sections.
    pub fn creature_config(&self) -> CreatureConfig {
        CreatureConfig {
            screen_width: self.world.screen_width,
            screen_height: self.world.screen_height,
            max_speed: self.creatures.max_speed,
            change_direction_interval: self.creatures.change_direction_interval,
            body_size: self.creatures.body_size,
            ..CreatureConfig::default()
        }
    }

    /// Genetic algorithm parameters from the `evolution` section.
    pub const fn evolution_params(&self) -> EvolutionParams {
        EvolutionParams {
            generation_size: self.evolution.generation_size,
            elite_percent: self.evolution.elite_percent,
            mutation_rate: self.evolution.mutation_rate,
            crossover_rate: self.evolution.crossover_rate,
        }
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Extra pause after a generation turnover.
    #[serde(default = "default_turnover_pause_ms")]
    pub turnover_pause_ms: u64,

    /// Screen width in pixels.
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,

    /// Screen height in pixels.
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,
}

impl WorldConfig {
    /// Override the seed with `EVOSIM_SEED` when it is set and parses.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(SEED_ENV_VAR)
            && let Ok(seed) = val.trim().parse::<u64>()
        {
            self.seed = seed;
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            tick_interval_ms: default_tick_interval_ms(),
            turnover_pause_ms: default_turnover_pause_ms(),
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
        }
    }
}

/// Creature movement configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreaturesConfig {
    /// Per-axis speed bound.
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,

    /// Exclusive upper bound of the re-heading countdown.
    #[serde(default = "default_change_direction_interval")]
    pub change_direction_interval: i32,

    /// Side of the square collision box.
    #[serde(default = "default_body_size")]
    pub body_size: f64,
}

impl Default for CreaturesConfig {
    fn default() -> Self {
        Self {
            max_speed: default_max_speed(),
            change_direction_interval: default_change_direction_interval(),
            body_size: default_body_size(),
        }
    }
}

/// Genetic algorithm configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvolutionConfig {
    /// Creatures per generation.
    #[serde(default = "default_generation_size")]
    pub generation_size: usize,

    /// Share of the ranked population kept as the breeding pool, in percent.
    #[serde(default = "default_elite_percent")]
    pub elite_percent: usize,

    /// Probability that a child is mutated.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,

    /// Probability that a child takes its traits from the second parent.
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            generation_size: default_generation_size(),
            elite_percent: default_elite_percent(),
            mutation_rate: default_mutation_rate(),
            crossover_rate: default_crossover_rate(),
        }
    }
}

/// Run boundaries. Zero means unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Stop after this many ticks.
    #[serde(default)]
    pub max_ticks: u64,

    /// Stop once the generation counter reaches this value.
    #[serde(default)]
    pub max_generations: u64,

    /// Stop after this many wall-clock seconds.
    #[serde(default)]
    pub max_real_time_seconds: u64,
}

/// Which presentation the engine attaches to the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Structured log lines: the HUD at every turnover, frames at debug.
    #[default]
    Log,
    /// One JSON [`FrameSnapshot`](evosim_types::FrameSnapshot) per tick on stdout.
    Json,
}

/// Presentation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RenderConfig {
    /// Renderer to use.
    #[serde(default)]
    pub mode: RenderMode,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_interval_ms() -> u64 {
    100
}

const fn default_turnover_pause_ms() -> u64 {
    1000
}

const fn default_screen_width() -> u32 {
    1350
}

const fn default_screen_height() -> u32 {
    650
}

const fn default_max_speed() -> f64 {
    10.0
}

const fn default_change_direction_interval() -> i32 {
    20
}

const fn default_body_size() -> f64 {
    20.0
}

const fn default_generation_size() -> usize {
    30
}

const fn default_elite_percent() -> usize {
    20
}

const fn default_mutation_rate() -> f64 {
    0.1
}

const fn default_crossover_rate() -> f64 {
    0.5
}

fn default_log_level() -> String {
    "info".to_owned()
}
