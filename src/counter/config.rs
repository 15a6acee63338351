//! Run configuration
//!
//! [`GridConfig`] is the only way a grid size and step delay reach the
//! counter, so every value a traversal sees has already been validated.
//! There are two sets of bounds:
//!
//! - algorithm bounds ([`GridConfig::new`]): any size whose path count fits
//!   in a `u64`, any delay
//! - input bounds ([`GridConfig::from_input`], [`GridConfig::clamped`]): the
//!   ranges the interactive controls offer

use super::constants::*;
use super::errors::CounterError;
use std::time::Duration;

/// Validated grid size and step delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    grid_size: usize,
    step_delay: Duration,
}

impl GridConfig {
    /// Create a config within the algorithm bounds
    pub fn new(grid_size: usize, step_delay: Duration) -> Result<Self, CounterError> {
        check_size(grid_size, MIN_GRID_SIZE, MAX_GRID_SIZE)?;
        Ok(GridConfig {
            grid_size,
            step_delay,
        })
    }

    /// Create a config within the interactive input bounds
    pub fn from_input(grid_size: usize, step_delay_ms: u64) -> Result<Self, CounterError> {
        check_size(grid_size, INPUT_MIN_GRID_SIZE, INPUT_MAX_GRID_SIZE)?;
        if !(INPUT_MIN_STEP_DELAY_MS..=INPUT_MAX_STEP_DELAY_MS).contains(&step_delay_ms) {
            return Err(CounterError::StepDelayOutOfRange {
                delay_ms: step_delay_ms,
                min: INPUT_MIN_STEP_DELAY_MS,
                max: INPUT_MAX_STEP_DELAY_MS,
            });
        }
        Ok(GridConfig {
            grid_size,
            step_delay: Duration::from_millis(step_delay_ms),
        })
    }

    /// Clamp both values into the interactive input bounds
    pub fn clamped(grid_size: usize, step_delay_ms: u64) -> Self {
        GridConfig {
            grid_size: grid_size.clamp(INPUT_MIN_GRID_SIZE, INPUT_MAX_GRID_SIZE),
            step_delay: Duration::from_millis(
                step_delay_ms.clamp(INPUT_MIN_STEP_DELAY_MS, INPUT_MAX_STEP_DELAY_MS),
            ),
        }
    }

    /// Parse a typed grid size
    pub fn parse_size(input: &str) -> Result<usize, CounterError> {
        input
            .trim()
            .parse::<usize>()
            .map_err(|_| CounterError::NotANumber {
                field: "grid size",
                input: input.to_string(),
            })
    }

    /// Parse a typed step delay in milliseconds
    pub fn parse_delay(input: &str) -> Result<u64, CounterError> {
        input
            .trim()
            .parse::<u64>()
            .map_err(|_| CounterError::NotANumber {
                field: "step delay",
                input: input.to_string(),
            })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    pub fn step_delay_ms(&self) -> u64 {
        u64::try_from(self.step_delay.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            grid_size: DEFAULT_GRID_SIZE,
            step_delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
        }
    }
}

fn check_size(size: usize, min: usize, max: usize) -> Result<(), CounterError> {
    if (min..=max).contains(&size) {
        Ok(())
    } else {
        Err(CounterError::GridSizeOutOfRange { size, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_bounds() {
        assert!(GridConfig::new(1, Duration::ZERO).is_ok());
        assert!(GridConfig::new(MAX_GRID_SIZE, Duration::ZERO).is_ok());
        assert_eq!(
            GridConfig::new(0, Duration::ZERO),
            Err(CounterError::GridSizeOutOfRange {
                size: 0,
                min: 1,
                max: MAX_GRID_SIZE
            })
        );
        assert!(GridConfig::new(MAX_GRID_SIZE + 1, Duration::ZERO).is_err());
    }

    #[test]
    fn test_input_bounds() {
        assert!(GridConfig::from_input(2, 100).is_ok());
        assert!(GridConfig::from_input(20, 1000).is_ok());
        assert!(GridConfig::from_input(1, 300).is_err());
        assert!(matches!(
            GridConfig::from_input(5, 50),
            Err(CounterError::StepDelayOutOfRange { delay_ms: 50, .. })
        ));
    }

    #[test]
    fn test_clamped() {
        let config = GridConfig::clamped(99, 5);
        assert_eq!(config.grid_size(), INPUT_MAX_GRID_SIZE);
        assert_eq!(config.step_delay_ms(), INPUT_MIN_STEP_DELAY_MS);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(GridConfig::parse_size(" 7 "), Ok(7));
        assert!(matches!(
            GridConfig::parse_size("seven"),
            Err(CounterError::NotANumber {
                field: "grid size",
                ..
            })
        ));
        assert!(GridConfig::parse_delay("-3").is_err());
    }

    #[test]
    fn test_delay_millis_saturate() {
        let config = GridConfig::new(3, Duration::MAX).unwrap();
        assert_eq!(config.step_delay_ms(), u64::MAX);
        let config = GridConfig::new(3, Duration::from_millis(250)).unwrap();
        assert_eq!(config.step_delay_ms(), 250);
    }

    #[test]
    fn test_default_matches_visualizer() {
        let config = GridConfig::default();
        assert_eq!(config.grid_size(), 5);
        assert_eq!(config.step_delay(), Duration::from_millis(300));
    }
}
