//! Memoized DFS path counting
//!
//! This module provides the counting engine:
//! - [`traversal`]: the `visit` descent as an explicit state machine
//! - [`engine`]: [`PathCounter`], the control surface with generation tagging
//! - [`config`]: validated grid size and step delay
//! - [`errors`]: precondition and history error types
//!
//! # Execution Model
//!
//! A run is a sequence of [`Step`]s. The counter never waits on its own; the
//! caller holds each step for `step.pause` and then resumes with the run's
//! [`Generation`]. Starting, resetting or reconfiguring bumps the generation,
//! which turns every outstanding continuation into a no-op.

pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod traversal;

pub use config::GridConfig;
pub use engine::{Advance, Generation, PathCounter};
pub use errors::CounterError;
pub use traversal::Traversal;

use crate::snapshot::Step;
use std::time::Duration;

/// Count monotone paths across a `grid_size`×`grid_size` grid, handing
/// every step to `pace`
pub fn run(
    grid_size: usize,
    step_delay: Duration,
    pace: impl FnMut(&Step),
) -> Result<u64, CounterError> {
    let config = GridConfig::new(grid_size, step_delay)?;
    let mut counter = PathCounter::new(config);
    Ok(counter.run(pace))
}

/// Count monotone paths without pacing or history
pub fn count_paths(grid_size: usize) -> Result<u64, CounterError> {
    let config = GridConfig::new(grid_size, Duration::ZERO)?;
    Ok(Traversal::new(config).run_to_end())
}
