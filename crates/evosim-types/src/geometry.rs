//! Planar geometry used by creature kinematics and edge collision.
//!
//! Screen space has its origin at the top-left corner with `y` growing
//! downwards, so a box's `top` is its smallest `y`.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// A 2D vector of `f64` components, used for both positions and velocities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component (positive is downwards).
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Signed mean of the two components, `(x + y) / 2`.
    ///
    /// This is the "average per-axis speed" shown next to each creature and
    /// folded into the population speed statistic.
    pub const fn mean_component(self) -> f64 {
        f64::midpoint(self.x, self.y)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

/// An axis-aligned rectangle used only for screen-edge tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Smallest `x` covered by the box.
    pub left: f64,
    /// Smallest `y` covered by the box.
    pub top: f64,
    /// Largest `x` covered by the box.
    pub right: f64,
    /// Largest `y` covered by the box.
    pub bottom: f64,
}

impl BoundingBox {
    /// Build a square box of side `size` whose top-left corner is `origin`.
    pub const fn anchored_at(origin: Vec2, size: f64) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size,
            bottom: origin.y + size,
        }
    }

    /// Whether the box pokes past the left edge (0) or the right edge (`width`).
    pub const fn crosses_vertical_wall(&self, width: f64) -> bool {
        self.left < 0.0 || self.right > width
    }

    /// Whether the box pokes past the top edge (0) or the bottom edge (`height`).
    pub const fn crosses_horizontal_wall(&self, height: f64) -> bool {
        self.top < 0.0 || self.bottom > height
    }
}
