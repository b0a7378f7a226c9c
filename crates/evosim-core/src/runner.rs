//! Simulation loop runner with operator controls.
//!
//! This module provides [`run_simulation`], the top-level async function
//! that drives the tick loop with support for:
//!
//! - **Quit signal**: checked once per tick through [`OperatorState`]
//! - **Bounded simulation**: stop after `max_ticks`, `max_generations` or
//!   `max_real_time_seconds`
//! - **Pacing**: a fixed pause after every tick and a longer one after each
//!   generation turnover
//! - **Presentation**: a [`FrameRenderer`] sees the state after every tick
//!
//! Everything happens on one task; a tick is never interleaved with another.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::frame::FrameRenderer;
use crate::operator::{OperatorState, SimulationEndReason};
use crate::tick::{self, SimulationState, TickError, TickSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Run the simulation loop until a termination condition is met.
///
/// Per iteration: check the quit signal and the wall-clock bound, run one
/// tick, pause after a turnover, hand the frame to `renderer`, check the
/// tick and generation bounds, then pause for the tick interval.
pub async fn run_simulation(
    state: &mut SimulationState,
    operator: &Arc<OperatorState>,
    renderer: &mut dyn FrameRenderer,
) -> Result<SimulationResult, RunnerError> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks = operator.max_ticks(),
        max_generations = operator.max_generations(),
        max_real_time_seconds = operator.max_real_time_seconds(),
        tick_interval_ms = operator.tick_interval_ms(),
        generation_size = state.population.len(),
        "Simulation starting"
    );

    loop {
        // --- Check stop request (before tick) ---
        if operator.is_stop_requested() {
            info!("Operator stop requested");
            return finish(operator, SimulationEndReason::OperatorStop, last_summary, total_ticks)
                .await;
        }

        // --- Check time limit (before tick) ---
        if operator.time_limit_reached() {
            info!(
                max_seconds = operator.max_real_time_seconds(),
                elapsed = operator.elapsed_seconds(),
                "Real-time limit reached"
            );
            return finish(
                operator,
                SimulationEndReason::MaxRealTimeReached,
                last_summary,
                total_ticks,
            )
            .await;
        }

        // --- Execute tick ---
        let summary = tick::run_tick(state)?;
        total_ticks = total_ticks.saturating_add(1);

        // --- Turnover pause ---
        if summary.turnover {
            sleep_ms(operator.turnover_pause_ms()).await;
        }

        // --- Render ---
        renderer.on_frame(&summary, state);

        // --- Check tick limit (after tick) ---
        if operator.tick_limit_reached(summary.tick) {
            info!(
                tick = summary.tick,
                max_ticks = operator.max_ticks(),
                "Tick limit reached"
            );
            return finish(
                operator,
                SimulationEndReason::MaxTicksReached,
                Some(summary),
                total_ticks,
            )
            .await;
        }

        // --- Check generation limit (after tick) ---
        if operator.generation_limit_reached(summary.generation) {
            info!(
                generation = summary.generation,
                max_generations = operator.max_generations(),
                "Generation limit reached"
            );
            return finish(
                operator,
                SimulationEndReason::MaxGenerationsReached,
                Some(summary),
                total_ticks,
            )
            .await;
        }

        last_summary = Some(summary);

        // --- Sleep for tick interval ---
        sleep_ms(operator.tick_interval_ms()).await;
    }
}

async fn finish(
    operator: &OperatorState,
    end_reason: SimulationEndReason,
    final_summary: Option<TickSummary>,
    total_ticks: u64,
) -> Result<SimulationResult, RunnerError> {
    operator.set_end_reason(end_reason).await;
    Ok(SimulationResult {
        end_reason,
        final_summary,
        total_ticks,
    })
}

/// Sleep for `ms`, or just yield when it is zero so other tasks (the quit
/// signal listener) still get to run.
async fn sleep_ms(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    } else {
        tokio::task::yield_now().await;
    }
}

/// Log the simulation end sequence.
pub fn log_simulation_end(result: &SimulationResult, state: &SimulationState) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        "Simulation ended"
    );

    if result.final_summary.is_some() {
        let [generation, speed, spikes] = state.stats.hud_lines();
        info!(
            generation = %generation,
            average_speed = %speed,
            spike_percentage = %spikes,
            score = state.stats.score,
            agents_alive = state.population.alive_count(),
            "Final statistics"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}
