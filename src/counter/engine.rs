// Control surface for the path counter

use super::config::GridConfig;
use super::constants::DEFAULT_HISTORY_LIMIT;
use super::errors::CounterError;
use super::traversal::Traversal;
use crate::snapshot::{Snapshot, SnapshotManager, Step};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Tag identifying one run's continuations.
///
/// Ids are handed out from a process-wide counter, so a continuation from a
/// superseded run can never match a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    fn fresh() -> Self {
        Generation(NEXT_GENERATION.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Outcome of resuming a run
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// The run produced its next snapshot
    Step(Step),
    /// The run has finished with this many paths
    Finished(u64),
    /// The continuation belongs to a superseded run and was discarded
    Stale,
    /// No run is active
    Idle,
}

/// The path counter: owns the active traversal and its snapshot history
pub struct PathCounter {
    /// Size and delay for the next run
    config: GridConfig,

    /// Generation of the active run
    generation: Generation,

    /// Active traversal, if a run is in progress
    traversal: Option<Traversal>,

    /// Snapshots emitted by the active or last run
    history: SnapshotManager,

    /// Set when the history budget was exhausted for this run
    history_error: Option<CounterError>,

    /// Result of the last completed run
    total: Option<u64>,
}

impl PathCounter {
    /// Create a counter with the default history budget
    pub fn new(config: GridConfig) -> Self {
        Self::with_history_limit(config, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(config: GridConfig, history_limit: usize) -> Self {
        PathCounter {
            config,
            generation: Generation::fresh(),
            traversal: None,
            history: SnapshotManager::new(history_limit),
            history_error: None,
            total: None,
        }
    }

    /// Apply a new size and delay. Cancels any active run.
    pub fn configure(&mut self, config: GridConfig) {
        info!(
            "configured grid size {} with step delay {}ms",
            config.grid_size(),
            config.step_delay_ms()
        );
        self.config = config;
        self.reset();
    }

    /// Start a new run from the origin and return its generation
    pub fn start(&mut self) -> Generation {
        self.reset();
        self.traversal = Some(Traversal::new(self.config));
        debug!(
            "started run {} on a {}x{} grid",
            self.generation.id(),
            self.config.grid_size(),
            self.config.grid_size()
        );
        self.generation
    }

    /// Clear all transient state without starting a run.
    ///
    /// Continuations from the previous generation become stale.
    pub fn reset(&mut self) {
        let previous = self.generation;
        self.generation = Generation::fresh();
        self.traversal = None;
        self.history.clear();
        self.history_error = None;
        self.total = None;
        debug!(
            "reset: generation {} -> {}",
            previous.id(),
            self.generation.id()
        );
    }

    /// Resume the run tagged `generation`.
    ///
    /// A stale generation mutates nothing.
    pub fn resume(&mut self, generation: Generation) -> Advance {
        if generation != self.generation {
            debug!(
                "discarding stale continuation from generation {} (current {})",
                generation.id(),
                self.generation.id()
            );
            return Advance::Stale;
        }

        let Some(traversal) = self.traversal.as_mut() else {
            return match self.total {
                Some(total) => Advance::Finished(total),
                None => Advance::Idle,
            };
        };

        match traversal.next() {
            Some(step) => {
                self.record(&step.snapshot);
                Advance::Step(step)
            }
            None => {
                let total = traversal.total().unwrap_or(0);
                info!(
                    "run {} finished: {} paths in {} snapshots",
                    generation.id(),
                    total,
                    self.history.len()
                );
                self.traversal = None;
                self.total = Some(total);
                Advance::Finished(total)
            }
        }
    }

    /// Start a run and drive it to completion, handing each step to `pace`
    pub fn run(&mut self, mut pace: impl FnMut(&Step)) -> u64 {
        let generation = self.start();
        loop {
            match self.resume(generation) {
                Advance::Step(step) => pace(&step),
                Advance::Finished(total) => return total,
                Advance::Stale | Advance::Idle => return self.total.unwrap_or(0),
            }
        }
    }

    fn record(&mut self, snapshot: &Snapshot) {
        if self.history_error.is_some() {
            return;
        }
        if let Err(e) = self.history.push(snapshot.clone()) {
            warn!("history recording stopped: {}", e);
            self.history_error = Some(e);
        }
    }

    // ========== Getter methods for UI ==========

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn history(&self) -> &SnapshotManager {
        &self.history
    }

    /// Error that stopped history recording, if any
    pub fn history_error(&self) -> Option<&CounterError> {
        self.history_error.as_ref()
    }

    /// Latest snapshot of the active or last run
    pub fn latest(&self) -> Option<&Snapshot> {
        self.history.last()
    }

    pub fn is_running(&self) -> bool {
        self.traversal.is_some()
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }
}

impl Default for PathCounter {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}
