//! Operator control state shared between the tick loop and the outside world.
//!
//! The quit signal is an [`AtomicBool`] that anything holding the
//! [`Arc<OperatorState>`](std::sync::Arc) can flip (the engine wires it to
//! ctrl-c). The loop checks it once per tick, so stopping is cooperative and
//! never interrupts a tick halfway.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::config::{SimulationBoundsConfig, WorldConfig};

/// Reason why the simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimulationEndReason {
    /// A quit was requested.
    OperatorStop,
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// Reached the configured `max_generations` limit.
    MaxGenerationsReached,
    /// Reached the configured `max_real_time_seconds` limit.
    MaxRealTimeReached,
}

/// Shared operator control state.
#[derive(Debug)]
pub struct OperatorState {
    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Pause between ticks in milliseconds.
    tick_interval_ms: u64,

    /// Extra pause after a generation turnover.
    turnover_pause_ms: u64,

    /// Wall-clock time when the simulation started.
    started_at: DateTime<Utc>,

    /// Maximum number of ticks (0 = unlimited).
    max_ticks: u64,

    /// Maximum generation counter (0 = unlimited).
    max_generations: u64,

    /// Maximum wall-clock seconds (0 = unlimited).
    max_real_time_seconds: u64,

    /// Reason the simulation ended, if it has.
    end_reason: Mutex<Option<SimulationEndReason>>,
}

impl OperatorState {
    /// Create a new operator state from configuration.
    pub fn new(world: &WorldConfig, bounds: &SimulationBoundsConfig) -> Self {
        Self {
            stop_requested: AtomicBool::new(false),
            tick_interval_ms: world.tick_interval_ms,
            turnover_pause_ms: world.turnover_pause_ms,
            started_at: Utc::now(),
            max_ticks: bounds.max_ticks,
            max_generations: bounds.max_generations,
            max_real_time_seconds: bounds.max_real_time_seconds,
            end_reason: Mutex::new(None),
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean simulation stop.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Record the reason the simulation ended.
    pub async fn set_end_reason(&self, reason: SimulationEndReason) {
        let mut guard = self.end_reason.lock().await;
        *guard = Some(reason);
    }

    /// Get the reason the simulation ended, if it has.
    pub async fn end_reason(&self) -> Option<SimulationEndReason> {
        *self.end_reason.lock().await
    }

    // -----------------------------------------------------------------------
    // Pacing
    // -----------------------------------------------------------------------

    /// Pause taken after every tick.
    pub const fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    /// Pause taken right after a generation turnover.
    pub const fn turnover_pause_ms(&self) -> u64 {
        self.turnover_pause_ms
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// Returns `true` if `max_ticks > 0` and `current_tick >= max_ticks`.
    pub const fn tick_limit_reached(&self, current_tick: u64) -> bool {
        self.max_ticks > 0 && current_tick >= self.max_ticks
    }

    /// Returns `true` if `max_generations > 0` and `generation >= max_generations`.
    pub const fn generation_limit_reached(&self, generation: u64) -> bool {
        self.max_generations > 0 && generation >= self.max_generations
    }

    /// Returns `true` if `max_real_time_seconds > 0` and that many seconds
    /// have passed since start.
    pub fn time_limit_reached(&self) -> bool {
        if self.max_real_time_seconds == 0 {
            return false;
        }
        self.elapsed_seconds() >= self.max_real_time_seconds
    }

    /// Return the wall-clock start time.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Return elapsed seconds since simulation start.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        // `num_seconds` can be negative if clocks are weird; treat as 0.
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }

    /// Get the configured max ticks.
    pub const fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    /// Get the configured max generations.
    pub const fn max_generations(&self) -> u64 {
        self.max_generations
    }

    /// Get the configured max real-time seconds.
    pub const fn max_real_time_seconds(&self) -> u64 {
        self.max_real_time_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unbounded() -> OperatorState {
        OperatorState::new(&WorldConfig::default(), &SimulationBoundsConfig::default())
    }

    #[test]
    fn initial_state_is_running() {
        let state = unbounded();
        assert!(!state.is_stop_requested());
        assert_eq!(state.tick_interval_ms(), 100);
        assert_eq!(state.turnover_pause_ms(), 1000);
    }

    #[test]
    fn stop_request_sticks() {
        let state = unbounded();
        state.request_stop();
        assert!(state.is_stop_requested());
        state.request_stop();
        assert!(state.is_stop_requested());
    }

    #[test]
    fn pacing_comes_from_world_config() {
        let world = WorldConfig {
            tick_interval_ms: 250,
            turnover_pause_ms: 40,
            ..WorldConfig::default()
        };
        let state = OperatorState::new(&world, &SimulationBoundsConfig::default());
        assert_eq!(state.tick_interval_ms(), 250);
        assert_eq!(state.turnover_pause_ms(), 40);
    }

    #[test]
    fn end_reason_serializes_by_variant_name() {
        let json = serde_json::to_string(&SimulationEndReason::MaxGenerationsReached);
        assert_eq!(json.ok().as_deref(), Some("\"MaxGenerationsReached\""));
    }

    #[test]
    fn zero_bounds_mean_unlimited() {
        let state = unbounded();
        assert!(!state.tick_limit_reached(999_999));
        assert!(!state.generation_limit_reached(999_999));
        assert!(!state.time_limit_reached());
    }

    #[test]
    fn limits_trip_at_their_threshold() {
        let bounds = SimulationBoundsConfig {
            max_ticks: 10,
            max_generations: 3,
            max_real_time_seconds: 0,
        };
        let state = OperatorState::new(&WorldConfig::default(), &bounds);
        assert!(!state.tick_limit_reached(9));
        assert!(state.tick_limit_reached(10));
        assert!(!state.generation_limit_reached(2));
        assert!(state.generation_limit_reached(3));
    }

    #[tokio::test]
    async fn end_reason_round_trips() {
        let state = unbounded();
        assert_eq!(state.end_reason().await, None);
        state
            .set_end_reason(SimulationEndReason::MaxGenerationsReached)
            .await;
        assert_eq!(
            state.end_reason().await,
            Some(SimulationEndReason::MaxGenerationsReached)
        );
    }
}
