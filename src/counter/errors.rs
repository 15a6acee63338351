//! Error types for the path counter
//!
//! This module defines [`CounterError`]. Every variant is raised before a
//! traversal starts (bad configuration) or while recording history; a running
//! traversal itself never fails.

use std::fmt;

/// Errors reported by configuration and the snapshot history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterError {
    /// Grid size outside the accepted range
    GridSizeOutOfRange { size: usize, min: usize, max: usize },

    /// Step delay outside the accepted range
    StepDelayOutOfRange { delay_ms: u64, min: u64, max: u64 },

    /// A configuration value could not be parsed as a number
    NotANumber { field: &'static str, input: String },

    /// Snapshot history limit exceeded
    SnapshotLimitExceeded { current: usize, limit: usize },
}

impl fmt::Display for CounterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterError::GridSizeOutOfRange { size, min, max } => {
                write!(
                    f,
                    "Grid size {} is out of range (must be between {} and {})",
                    size, min, max
                )
            }
            CounterError::StepDelayOutOfRange { delay_ms, min, max } => {
                write!(
                    f,
                    "Step delay {}ms is out of range (must be between {}ms and {}ms)",
                    delay_ms, min, max
                )
            }
            CounterError::NotANumber { field, input } => {
                write!(f, "Invalid {}: '{}' is not a number", field, input)
            }
            CounterError::SnapshotLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Snapshot memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
        }
    }
}

impl std::error::Error for CounterError {}
