//! Headless renderers selected by `render.mode`.
//!
//! - [`LogRenderer`] reports the heads-up statistics through `tracing` at
//!   every turnover, and each frame at `debug`.
//! - [`JsonLinesRenderer`] writes one serialized [`FrameSnapshot`] per tick,
//!   one per line, for an external viewer to draw.

use std::io::{self, Write};

use evosim_core::frame::{self, FrameRenderer};
use evosim_core::stats::GenerationStats;
use evosim_core::tick::{SimulationState, TickSummary};
use evosim_types::FrameSnapshot;
use tracing::{debug, info, trace, warn};

/// Renders the simulation as log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRenderer;

impl LogRenderer {
    /// Create a log renderer.
    pub const fn new() -> Self {
        Self
    }
}

impl FrameRenderer for LogRenderer {
    fn on_frame(&mut self, summary: &TickSummary, state: &SimulationState) {
        if summary.turnover {
            info!(tick = summary.tick, "{}", hud_line(&state.stats));
        }

        debug!(
            tick = summary.tick,
            generation = summary.generation,
            alive = summary.agents_alive,
            deaths = summary.deaths,
            "Frame"
        );
        for creature in state.population.iter().filter(|c| c.is_alive()) {
            trace!(
                x = creature.position.x,
                y = creature.position.y,
                spikes = creature.spikes,
                label = %creature.label(),
                "Creature"
            );
        }
    }
}

/// The three HUD lines joined into one log message.
fn hud_line(stats: &GenerationStats) -> String {
    stats.hud_lines().join(" | ")
}

/// Streams every frame as a line of JSON.
///
/// The first write failure is logged and the renderer goes quiet; the
/// simulation itself keeps running.
#[derive(Debug)]
pub struct JsonLinesRenderer<W> {
    out: W,
    failed: bool,
}

impl<W: Write + Send> JsonLinesRenderer<W> {
    /// Wrap a writer, typically stdout.
    pub const fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    /// Whether a write has failed and output was abandoned.
    #[cfg(test)]
    pub const fn has_failed(&self) -> bool {
        self.failed
    }

    /// Give back the underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> FrameRenderer for JsonLinesRenderer<W> {
    fn on_frame(&mut self, summary: &TickSummary, state: &SimulationState) {
        if self.failed {
            return;
        }
        let frame = frame::snapshot(summary, state);
        if let Err(e) = write_line(&mut self.out, &frame) {
            warn!(
                tick = summary.tick,
                error = %e,
                "failed to write frame, JSON output disabled"
            );
            self.failed = true;
        }
    }
}

fn write_line<W: Write>(out: &mut W, frame: &FrameSnapshot) -> io::Result<()> {
    serde_json::to_writer(&mut *out, frame)?;
    out.write_all(b"\n")?;
    out.flush()
}
