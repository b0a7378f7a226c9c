//! End-to-end tests of the generational cycle through the public API.
//!
//! These drive [`run_tick`] directly, the way the runner does, and check
//! what a renderer would observe across several turnovers.

#![allow(clippy::unwrap_used)]

use evosim_agents::RandomSource;
use evosim_core::config::SimulationConfig;
use evosim_core::frame;
use evosim_core::tick::{SimulationState, TickSummary, run_tick};

/// Always draws the middle of every range, never wins a coin flip, and
/// always picks the first candidate.
struct MidpointRandom;

impl RandomSource for MidpointRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) / 2.0
    }

    fn int_range(&mut self, low: i32, high: i32) -> i32 {
        low.saturating_add(high.saturating_sub(low) / 2)
    }

    fn chance(&mut self, _probability: f64) -> bool {
        false
    }

    fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then_some(0)
    }
}

fn run_until_turnover(state: &mut SimulationState, max_ticks: u64) -> Option<TickSummary> {
    for _ in 0..max_ticks {
        let summary = run_tick(state).unwrap();
        if summary.turnover {
            return Some(summary);
        }
    }
    None
}

#[test]
fn midpoint_source_gives_exact_turnover_ticks() {
    let config = SimulationConfig::default();
    let mut state = SimulationState::with_random(&config, Box::new(MidpointRandom));

    // Birth age is the midpoint of [5, 50).
    let first = run_until_turnover(&mut state, 100).unwrap();
    assert_eq!(first.tick, 27);
    assert_eq!(first.generation, 2);
    assert_eq!(first.deaths, 30);

    // Everyone shares the traits of the single fittest creature.
    assert!((state.stats.score - 3.0).abs() < 1e-12);
    assert!(state.stats.average_speed.abs() < 1e-12);
    assert!((state.stats.spike_percentage - 100.0).abs() < 1e-12);

    // Offspring inherit the respawn age, the midpoint of [5, 30).
    let second = run_until_turnover(&mut state, 100).unwrap();
    assert_eq!(second.tick, 27 + 17);
    assert_eq!(second.generation, 3);
    assert!((state.stats.score - 6.0).abs() < 1e-12);
}

#[test]
fn same_seed_replays_identical_frames() {
    let config = SimulationConfig::default();
    let mut a = SimulationState::new(&config);
    let mut b = SimulationState::new(&config);

    for _ in 0..200 {
        let sa = run_tick(&mut a).unwrap();
        let sb = run_tick(&mut b).unwrap();
        assert_eq!(sa, sb);
        assert_eq!(frame::snapshot(&sa, &a), frame::snapshot(&sb, &b));
    }
    assert!(a.stats.generation > 1);
}

#[test]
fn several_generations_keep_size_and_sane_stats() {
    let config = SimulationConfig::default();
    let mut state = SimulationState::new(&config);

    let mut previous_generation = state.stats.generation;
    for _ in 0..5 {
        let summary = run_until_turnover(&mut state, 100).unwrap();
        assert_eq!(summary.generation, previous_generation + 1);
        previous_generation = summary.generation;

        assert_eq!(state.population.len(), 30);
        assert_eq!(state.population.alive_count(), 30);
        assert!((0.0..=100.0).contains(&state.stats.spike_percentage));
        assert!(state.stats.average_speed >= 0.0);
    }
    assert_eq!(state.stats.generation, 6);
    assert!(state.stats.score > 0.0);
}

#[test]
fn frame_after_turnover_shows_the_new_generation() {
    let config = SimulationConfig::default();
    let mut state = SimulationState::new(&config);

    let summary = run_until_turnover(&mut state, 100).unwrap();
    let frame = frame::snapshot(&summary, &state);

    assert_eq!(frame.generation, 2);
    assert_eq!(frame.alive_count(), 30);
    assert!((frame.spike_percentage - state.stats.spike_percentage).abs() < f64::EPSILON);
}
