// Constants for the path counter

/// Smallest grid the algorithm accepts (start equals goal)
pub const MIN_GRID_SIZE: usize = 1;

/// Largest grid whose path count fits in a `u64`: C(66, 33)
pub const MAX_GRID_SIZE: usize = 34;

/// Grid size bounds offered by the interactive controls
pub const INPUT_MIN_GRID_SIZE: usize = 2;
pub const INPUT_MAX_GRID_SIZE: usize = 20;

/// Step delay bounds offered by the interactive controls, in milliseconds
pub const INPUT_MIN_STEP_DELAY_MS: u64 = 100;
pub const INPUT_MAX_STEP_DELAY_MS: u64 = 1000;

pub const DEFAULT_GRID_SIZE: usize = 5;
pub const DEFAULT_STEP_DELAY_MS: u64 = 300;

/// Default byte budget for recorded snapshot history (256 MB)
pub const DEFAULT_HISTORY_LIMIT: usize = 256 * 1024 * 1024;
