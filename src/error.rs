//! Error types for bodyweight

use thiserror::Error;

/// Errors that can occur while building or assessing a body weight record
#[derive(Debug, Error)]
pub enum BodyWeightError {
    #[error("Invalid height: {0} (must be finite and greater than zero)")]
    InvalidHeight(f64),

    #[error("Invalid weight: {0} (must be finite and not negative)")]
    InvalidWeight(f64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown unit system: {0}")]
    UnknownUnitSystem(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
