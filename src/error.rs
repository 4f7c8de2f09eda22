//! Error taxonomy for the telemetry module.
//!
//! Only configuration defects are errors. Missing or partial data is not an
//! error here: it is absorbed into sentinel outputs by the callers (empty
//! series, unknown status, placeholder text).

use thiserror::Error;

/// Errors surfaced synchronously to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TelemetryError {
    /// Calibration range with `max <= min` (or a non-finite end).
    #[error("invalid bounds: min {min} must be strictly below max {max}")]
    InvalidBounds { min: f64, max: f64 },

    /// Threshold table that is empty or whose ceilings do not strictly increase.
    #[error("invalid status thresholds: {0}")]
    InvalidThresholds(String),

    /// A reading value that cannot be placed on a percentage scale.
    #[error("non-finite reading value for {0}")]
    NonFiniteReading(&'static str),
}

pub type Result<T> = std::result::Result<T, TelemetryError>;
