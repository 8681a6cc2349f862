//! Error types for trend classification
//!
//! Provides a unified error type for all lux-trend crates.

use thiserror::Error;

/// Core error type for trend classification and payload sequencing
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a constructor or function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// A light source or actuator reported a failure
    #[error("Hardware error: {0}")]
    Hardware(String),

    /// A finite light source has no more readings
    #[error("Light source exhausted after {0} readings")]
    SourceExhausted(usize),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Recorded flight log could not be parsed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a window that is too small to fit a line and test its slope
    pub fn capacity_too_small(capacity: usize, minimum: usize) -> Self {
        Self::InvalidParameter(format!(
            "window capacity {capacity} is below the minimum of {minimum}"
        ))
    }

    /// Create an error for a NaN/Inf reading
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} is NaN or infinite"))
    }

    /// Wrap a device failure
    pub fn hardware(device: &str, details: impl std::fmt::Display) -> Self {
        Self::Hardware(format!("{device}: {details}"))
    }
}
