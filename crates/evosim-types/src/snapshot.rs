//! Read-only frame snapshots handed to presentation layers.
//!
//! A renderer never touches live simulation state; it receives a
//! [`FrameSnapshot`] describing what to draw for the current tick.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// What a renderer needs to draw a single creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    /// Current position in screen space.
    pub position: Vec2,
    /// Dead creatures stay on screen but are drawn differently.
    pub alive: bool,
    /// Whether the creature carries spikes.
    pub spikes: bool,
    /// Short text shown next to the creature (speed and agility summary).
    pub label: String,
}

/// Everything drawn for one tick: creatures plus the heads-up statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Tick number that produced this frame.
    pub tick: u64,
    /// Current generation counter (starts at 1).
    pub generation: u64,
    /// Running total of per-generation mean agility.
    pub score: f64,
    /// Running total of per-generation mean speed magnitude.
    pub average_speed: f64,
    /// Share of the latest generation carrying spikes, in percent.
    pub spike_percentage: f64,
    /// One entry per creature, in population order.
    pub creatures: Vec<CreatureSnapshot>,
}

impl FrameSnapshot {
    /// Number of creatures in the frame that are still alive.
    pub fn alive_count(&self) -> usize {
        self.creatures.iter().filter(|c| c.alive).count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn frame_serializes_with_flat_creature_fields() {
        let frame = FrameSnapshot {
            tick: 3,
            generation: 2,
            score: 2.5,
            average_speed: 1.25,
            spike_percentage: 50.0,
            creatures: vec![CreatureSnapshot {
                position: Vec2::new(1.0, 2.0),
                alive: false,
                spikes: true,
                label: String::from("AvgSpeed: 0.00, Agility: 1.00"),
            }],
        };

        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["generation"], 2);
        assert_eq!(json["creatures"][0]["position"]["y"], 2.0);
        assert_eq!(json["creatures"][0]["alive"], false);
        assert_eq!(frame.alive_count(), 0);
    }
}
