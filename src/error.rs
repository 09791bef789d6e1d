//! Error types for the ambient surface (config loading, driver startup).
//!
//! The simulation core itself never fails: capacity exhaustion is a silent
//! drop and lane counts are clamped.

use thiserror::Error;

/// Top-level error type for engine setup operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Config JSON could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Config value outside its valid domain
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Background driver thread failed to start
    #[error("Failed to start simulation driver: {0}")]
    DriverSpawn(#[from] std::io::Error),
}

/// Result alias for engine setup operations.
pub type Result<T> = std::result::Result<T, EngineError>;
