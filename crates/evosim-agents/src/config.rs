//! Tunables for creature movement and lifecycle.
//!
//! The engine builds a [`CreatureConfig`] from `evosim-config.yaml` at
//! startup and passes it into every [`Creature`](crate::Creature) operation.
//! Nothing here changes while a run is in progress.

/// A half-open integer range `[min, max)` used for random age draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    /// Inclusive lower bound.
    pub min: i32,
    /// Exclusive upper bound.
    pub max: i32,
}

/// A half-open float range `[min, max)` used for random trait draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitRange {
    /// Inclusive lower bound.
    pub min: f64,
    /// Exclusive upper bound.
    pub max: f64,
}

/// Configuration for creature kinematics and aging.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatureConfig {
    /// Screen width in pixels; right wall for reflection (default: 1350).
    pub screen_width: u32,

    /// Screen height in pixels; bottom wall for reflection (default: 650).
    pub screen_height: u32,

    /// Per-axis speed bound; velocities are drawn from `[-max_speed, max_speed)`
    /// (default: 10).
    pub max_speed: f64,

    /// Upper bound (exclusive) of the re-heading countdown (default: 20).
    pub change_direction_interval: i32,

    /// Side of the square collision box (default: 20).
    pub body_size: f64,

    /// Remaining lifetime drawn at birth (default: `[5, 50)`).
    pub birth_age: AgeRange,

    /// Age stored on a creature when it dies (default: `[5, 30)`).
    ///
    /// Offspring inherit this value, so it is the lifetime of the next
    /// generation before mutation.
    pub respawn_age: AgeRange,

    /// Agility drawn at birth (default: `[1, 5)`).
    pub agility: TraitRange,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            screen_width: 1350,
            screen_height: 650,
            max_speed: 10.0,
            change_direction_interval: 20,
            body_size: 20.0,
            birth_age: AgeRange { min: 5, max: 50 },
            respawn_age: AgeRange { min: 5, max: 30 },
            agility: TraitRange { min: 1.0, max: 5.0 },
        }
    }
}

impl CreatureConfig {
    /// Screen width as a coordinate.
    pub fn width(&self) -> f64 {
        f64::from(self.screen_width)
    }

    /// Screen height as a coordinate.
    pub fn height(&self) -> f64 {
        f64::from(self.screen_height)
    }
}
