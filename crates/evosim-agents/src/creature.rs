//! A single creature: kinematic state, heritable traits, and the per-tick step.
//!
//! Creatures are never removed from their population. Dying only flips
//! [`Creature::alive`]; the corpse keeps its position and traits until the
//! whole generation has died and is replaced.

use evosim_types::{BoundingBox, CreatureSnapshot, Vec2};
use tracing::trace;

use crate::config::{AgeRange, CreatureConfig};
use crate::random::RandomSource;

/// One simulated creature.
#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    /// Top-left anchor of the collision box; the authoritative coordinate.
    pub position: Vec2,
    /// Displacement applied every tick.
    pub velocity: Vec2,
    /// Heritable trait; drawn from `[1, 5)` and unbounded after mutation.
    pub agility: f64,
    /// Remaining lifetime in ticks while alive. After death it holds the
    /// freshly drawn age that offspring inherit.
    pub age: i32,
    /// Heritable boolean trait.
    pub spikes: bool,
    /// Cleared exactly when `age` reaches 0.
    pub alive: bool,
    /// Ticks left before the next random re-heading.
    pub direction_change_countdown: i32,
}

/// What happened during one [`Creature::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct StepResult {
    /// The creature died on this tick.
    pub died: bool,
    /// The creature picked a new random heading before moving.
    pub reheaded: bool,
    /// `velocity.x` was negated by a left/right wall.
    pub reflected_x: bool,
    /// `velocity.y` was negated by a top/bottom wall.
    pub reflected_y: bool,
}

impl Creature {
    /// Create a creature at a random integer point inside the screen,
    /// edges included.
    pub fn spawn_random(config: &CreatureConfig, rng: &mut dyn RandomSource) -> Self {
        let width = i32::try_from(config.screen_width).unwrap_or(i32::MAX);
        let height = i32::try_from(config.screen_height).unwrap_or(i32::MAX);
        let x = rng.int_range(0, width.saturating_add(1));
        let y = rng.int_range(0, height.saturating_add(1));
        Self::spawn(Vec2::new(f64::from(x), f64::from(y)), config, rng)
    }

    /// Create a living creature at `position` with random velocity and traits.
    ///
    /// Draw order: velocity x, velocity y, agility, age, spikes, countdown.
    pub fn spawn(position: Vec2, config: &CreatureConfig, rng: &mut dyn RandomSource) -> Self {
        let velocity = random_velocity(config.max_speed, rng);
        let agility = rng.uniform(config.agility.min, config.agility.max);
        let age = draw_age(config.birth_age, rng);
        let spikes = rng.int_range(0, 2) == 1;
        let direction_change_countdown = rng.int_range(0, config.change_direction_interval);

        Self {
            position,
            velocity,
            agility,
            age,
            spikes,
            alive: true,
            direction_change_countdown,
        }
    }

    /// Whether the creature is still alive.
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// The spikes trait as a number (0 or 1), as used by fitness and stats.
    pub const fn spike_value(&self) -> f64 {
        if self.spikes { 1.0 } else { 0.0 }
    }

    /// Collision box at the current position.
    pub const fn bounding_box(&self, config: &CreatureConfig) -> BoundingBox {
        BoundingBox::anchored_at(self.position, config.body_size)
    }

    /// Advance the creature by one tick.
    ///
    /// Callers must skip dead creatures. Walls are checked after the move
    /// and without clamping, so a creature already past an edge flips its
    /// velocity again on the next tick and can jitter there for a while.
    pub fn step(&mut self, config: &CreatureConfig, rng: &mut dyn RandomSource) -> StepResult {
        let mut result = StepResult::default();

        self.direction_change_countdown = self.direction_change_countdown.saturating_sub(1);
        if self.direction_change_countdown <= 0 {
            self.velocity = random_velocity(config.max_speed, rng);
            self.direction_change_countdown = rng.int_range(0, config.change_direction_interval);
            result.reheaded = true;
        }

        self.position += self.velocity;
        self.age = self.age.saturating_sub(1);

        let bounds = self.bounding_box(config);
        if bounds.crosses_vertical_wall(config.width()) {
            self.velocity.x = -self.velocity.x;
            result.reflected_x = true;
        }
        if bounds.crosses_horizontal_wall(config.height()) {
            self.velocity.y = -self.velocity.y;
            result.reflected_y = true;
        }

        if self.age == 0 {
            self.alive = false;
            self.age = draw_age(config.respawn_age, rng);
            result.died = true;
            trace!(
                x = self.position.x,
                y = self.position.y,
                inherited_age = self.age,
                "Creature died"
            );
        }

        result
    }

    /// Text drawn next to the creature: mean per-axis speed and agility.
    pub fn label(&self) -> String {
        format!(
            "AvgSpeed: {:.2}, Agility: {:.2}",
            self.velocity.mean_component().abs(),
            self.agility.abs()
        )
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self) -> CreatureSnapshot {
        CreatureSnapshot {
            position: self.position,
            alive: self.alive,
            spikes: self.spikes,
            label: self.label(),
        }
    }
}

/// Per-axis velocity drawn from `[-max_speed, max_speed)`.
pub fn random_velocity(max_speed: f64, rng: &mut dyn RandomSource) -> Vec2 {
    let x = rng.uniform(-max_speed, max_speed);
    let y = rng.uniform(-max_speed, max_speed);
    Vec2::new(x, y)
}

fn draw_age(range: AgeRange, rng: &mut dyn RandomSource) -> i32 {
    rng.int_range(range.min, range.max)
}
