//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and the run so that
//! `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: evosim_core::config::ConfigError,
    },

    /// The logging filter could not be built from `logging.level`.
    #[error("invalid log filter {directive:?}: {message}")]
    LogFilter {
        /// The directive that failed to parse.
        directive: String,
        /// Description of the parse failure.
        message: String,
    },

    /// The simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: evosim_core::runner::RunnerError,
    },
}
