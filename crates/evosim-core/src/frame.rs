//! The contract between the tick loop and whatever draws it.
//!
//! Renderers receive the [`TickSummary`] and a shared borrow of the
//! [`SimulationState`] after every tick; they can read anything but change
//! nothing. [`snapshot`] packages what a renderer needs into an owned
//! [`FrameSnapshot`].

use evosim_agents::Creature;
use evosim_types::FrameSnapshot;

use crate::tick::{SimulationState, TickSummary};

/// Presentation layer invoked once per tick.
pub trait FrameRenderer: Send {
    /// Called after a tick (and any turnover pause) has completed.
    fn on_frame(&mut self, summary: &TickSummary, state: &SimulationState);
}

/// A renderer that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpRenderer;

impl FrameRenderer for NoOpRenderer {
    fn on_frame(&mut self, _summary: &TickSummary, _state: &SimulationState) {}
}

/// Build the owned frame for the tick described by `summary`.
pub fn snapshot(summary: &TickSummary, state: &SimulationState) -> FrameSnapshot {
    FrameSnapshot {
        tick: summary.tick,
        generation: state.stats.generation,
        score: state.stats.score,
        average_speed: state.stats.average_speed,
        spike_percentage: state.stats.spike_percentage,
        creatures: state.population.iter().map(Creature::snapshot).collect(),
    }
}
