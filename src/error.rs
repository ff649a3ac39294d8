//! Error types
//!
//! The per-frame simulation is infallible. Everything here is raised while
//! building a simulation: bad tuning files or an incomplete animation library.

use thiserror::Error;

/// Errors from loading or validating a [`crate::SimulationConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors raised while setting up a simulation
#[derive(Debug, Error)]
pub enum SimError {
    /// An animation key the state machine can request has no registered clip
    #[error("no clip registered for {actor} animation `{key}`")]
    MissingClip { actor: &'static str, key: &'static str },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
