//! Engine binary for the evosim creature-evolution simulation.
//!
//! Wires configuration, the seeded first generation, the quit signal and a
//! renderer around the tick loop, then runs until a termination condition
//! is met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `evosim-config.yaml` (or `EVOSIM_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Seed the first generation
//! 4. Create operator state from the world and simulation bounds
//! 5. Wire ctrl-c to the operator stop flag
//! 6. Pick the renderer from `render.mode`
//! 7. Run the simulation loop
//! 8. Log the result

mod error;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use evosim_core::config::{RenderMode, SimulationConfig};
use evosim_core::frame::FrameRenderer;
use evosim_core::operator::OperatorState;
use evosim_core::runner;
use evosim_core::tick::SimulationState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::render::{JsonLinesRenderer, LogRenderer};

/// Default configuration file, relative to the working directory.
const CONFIG_FILE: &str = "evosim-config.yaml";

/// Environment variable naming an alternative configuration file.
const CONFIG_ENV_VAR: &str = "EVOSIM_CONFIG";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the simulation fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let (config, config_source) = load_config()?;

    // 2. Initialize structured logging. Logs go to stderr so JSON frames
    //    own stdout.
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.logging.level).map_err(|e| {
            EngineError::LogFilter {
                directive: config.logging.level.clone(),
                message: e.to_string(),
            }
        })?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("evosim-engine starting");
    info!(
        source = %config_source,
        seed = config.world.seed,
        screen_width = config.world.screen_width,
        screen_height = config.world.screen_height,
        generation_size = config.evolution.generation_size,
        elite_percent = config.evolution.elite_percent,
        mutation_rate = config.evolution.mutation_rate,
        crossover_rate = config.evolution.crossover_rate,
        "Configuration loaded"
    );

    // 3. Seed the first generation.
    let mut state = SimulationState::new(&config);
    info!(
        creatures = state.population.len(),
        generation = state.stats.generation,
        "First generation seeded"
    );

    // 4. Create operator state.
    let operator = Arc::new(OperatorState::new(&config.world, &config.simulation));
    info!(
        max_ticks = operator.max_ticks(),
        max_generations = operator.max_generations(),
        max_real_time_seconds = operator.max_real_time_seconds(),
        tick_interval_ms = operator.tick_interval_ms(),
        turnover_pause_ms = operator.turnover_pause_ms(),
        started_at = %operator.started_at(),
        "Operator state initialized"
    );

    // 5. Quit signal.
    let quit = Arc::clone(&operator);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Quit signal received");
                quit.request_stop();
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for ctrl-c, quit signal disabled");
            }
        }
    });

    // 6. Renderer.
    let mut renderer: Box<dyn FrameRenderer> = match config.render.mode {
        RenderMode::Log => Box::new(LogRenderer::new()),
        RenderMode::Json => Box::new(JsonLinesRenderer::new(std::io::stdout())),
    };
    info!(mode = ?config.render.mode, "Renderer selected");

    // 7. Run the simulation.
    let result = runner::run_simulation(&mut state, &operator, &mut *renderer).await?;

    // 8. Log results.
    runner::log_simulation_end(&result, &state);
    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "evosim-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration.
///
/// Reads `EVOSIM_CONFIG` if set, otherwise `evosim-config.yaml` in the
/// working directory. A missing default file means defaults; a missing file
/// named explicitly is an error. Returns the config and where it came from.
fn load_config() -> Result<(SimulationConfig, String), EngineError> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV_VAR) {
        let path = PathBuf::from(explicit);
        let config = SimulationConfig::from_file(&path)?;
        return Ok((config, path.display().to_string()));
    }

    let path = PathBuf::from(CONFIG_FILE);
    if path.exists() {
        let config = SimulationConfig::from_file(&path)?;
        Ok((config, path.display().to_string()))
    } else {
        // Still honours EVOSIM_SEED and validation.
        let config = SimulationConfig::parse("")?;
        Ok((config, "defaults".to_owned()))
    }
}
