// Snapshot model and history for step-through playback

use crate::counter::errors::CounterError;
use crate::grid::{Cell, Grid};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// The traversal event a snapshot was taken at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapshotKind {
    /// A cell was entered and marked visited
    Visiting,
    /// The goal cell was reached and resolved to 1
    Settled,
    /// Both neighbours returned and the cell's total is known
    Totaled,
    /// The neighbours that supplied the total are highlighted
    ContributingShown,
    /// The total was written to the answers table
    Resolved,
    /// The cell left the call stack
    Cleanup,
}

impl SnapshotKind {
    /// How many step delays the view should hold this snapshot for
    pub fn pause_units(self) -> u32 {
        match self {
            SnapshotKind::Visiting | SnapshotKind::Settled => 1,
            SnapshotKind::Totaled | SnapshotKind::Resolved => 2,
            SnapshotKind::ContributingShown => 4,
            SnapshotKind::Cleanup => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SnapshotKind::Visiting => "visiting",
            SnapshotKind::Settled => "settled",
            SnapshotKind::Totaled => "totaled",
            SnapshotKind::ContributingShown => "contributing-shown",
            SnapshotKind::Resolved => "resolved",
            SnapshotKind::Cleanup => "cleanup",
        }
    }
}

/// Display role of a cell, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellRole {
    Updating,
    Current,
    Stack,
    Contributing,
    Visited,
    Unvisited,
}

impl CellRole {
    /// All roles in priority order (also the legend order)
    pub const ALL: [CellRole; 6] = [
        CellRole::Updating,
        CellRole::Current,
        CellRole::Stack,
        CellRole::Contributing,
        CellRole::Visited,
        CellRole::Unvisited,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CellRole::Updating => "Updating Cell",
            CellRole::Current => "Current Cell",
            CellRole::Stack => "Stack",
            CellRole::Contributing => "Contributing Cell",
            CellRole::Visited => "Visited Cell",
            CellRole::Unvisited => "Unvisited Cell",
        }
    }
}

/// Immutable record of traversal state at one animation step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub kind: SnapshotKind,
    pub grid_size: usize,
    pub current_cell: Option<Cell>,
    pub updating_cell: Option<Cell>,
    pub visited: BTreeSet<Cell>,
    pub stack: Vec<Cell>,
    pub contributing: BTreeSet<Cell>,
    pub answers: BTreeMap<Cell, u64>,
    pub memo_hits: usize,
}

impl Snapshot {
    /// Classify a cell for display.
    ///
    /// Priority is strict: updating > current > stack > contributing > visited.
    pub fn role_of(&self, cell: Cell) -> CellRole {
        if self.updating_cell == Some(cell) {
            CellRole::Updating
        } else if self.current_cell == Some(cell) {
            CellRole::Current
        } else if self.stack.contains(&cell) {
            CellRole::Stack
        } else if self.contributing.contains(&cell) {
            CellRole::Contributing
        } else if self.visited.contains(&cell) {
            CellRole::Visited
        } else {
            CellRole::Unvisited
        }
    }

    /// The displayed answer, or `-` while unresolved
    pub fn label_of(&self, cell: Cell) -> String {
        self.answers
            .get(&cell)
            .map_or_else(|| "-".to_string(), |n| n.to_string())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_size)
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough per-entry costs for B-tree nodes and vec slots
        let cell_entries = self.visited.len() + self.contributing.len();
        let answer_entries = self.answers.len();
        std::mem::size_of::<Snapshot>()
            + cell_entries * 32
            + answer_entries * 40
            + self.stack.len() * std::mem::size_of::<Cell>()
    }
}

/// A snapshot plus the pause the view should hold it for
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub snapshot: Snapshot,
    pub pause: Duration,
}

impl Step {
    pub fn new(snapshot: Snapshot, step_delay: Duration) -> Self {
        let pause = step_delay.saturating_mul(snapshot.kind.pause_units());
        Step { snapshot, pause }
    }

    pub fn kind(&self) -> SnapshotKind {
        self.snapshot.kind
    }
}

/// History of snapshots for one run, bounded by an estimated byte budget
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), CounterError> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(CounterError::SnapshotLimitExceeded {
                current: self.current_memory,
                limit: self.max_memory,
            });
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Drop all recorded snapshots
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current_memory = 0;
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(kind: SnapshotKind) -> Snapshot {
        Snapshot {
            kind,
            grid_size: 3,
            current_cell: None,
            updating_cell: None,
            visited: BTreeSet::new(),
            stack: Vec::new(),
            contributing: BTreeSet::new(),
            answers: BTreeMap::new(),
            memo_hits: 0,
        }
    }

    #[test]
    fn test_role_priority() {
        let cell = Cell::new(1, 1);
        let mut snap = blank(SnapshotKind::Resolved);
        assert_eq!(snap.role_of(cell), CellRole::Unvisited);

        snap.visited.insert(cell);
        assert_eq!(snap.role_of(cell), CellRole::Visited);

        snap.contributing.insert(cell);
        assert_eq!(snap.role_of(cell), CellRole::Contributing);

        snap.stack.push(cell);
        assert_eq!(snap.role_of(cell), CellRole::Stack);

        snap.current_cell = Some(cell);
        assert_eq!(snap.role_of(cell), CellRole::Current);

        snap.updating_cell = Some(cell);
        assert_eq!(snap.role_of(cell), CellRole::Updating);

        // Other cells are unaffected
        assert_eq!(snap.role_of(Cell::new(0, 0)), CellRole::Unvisited);
    }

    #[test]
    fn test_label_shows_dash_until_resolved() {
        let mut snap = blank(SnapshotKind::Visiting);
        assert_eq!(snap.label_of(Cell::new(0, 0)), "-");
        snap.answers.insert(Cell::new(0, 0), 6);
        assert_eq!(snap.label_of(Cell::new(0, 0)), "6");
    }

    #[test]
    fn test_pause_scales_with_kind() {
        let delay = Duration::from_millis(100);
        assert_eq!(
            Step::new(blank(SnapshotKind::Visiting), delay).pause,
            Duration::from_millis(100)
        );
        assert_eq!(
            Step::new(blank(SnapshotKind::ContributingShown), delay).pause,
            Duration::from_millis(400)
        );
        assert_eq!(
            Step::new(blank(SnapshotKind::Cleanup), delay).pause,
            Duration::ZERO
        );
    }

    #[test]
    fn test_pause_saturates_on_huge_delay() {
        let step = Step::new(blank(SnapshotKind::ContributingShown), Duration::MAX);
        assert_eq!(step.pause, Duration::MAX);
    }

    #[test]
    fn test_manager_enforces_limit() {
        let snap = blank(SnapshotKind::Visiting);
        let size = snap.estimated_size();
        let mut manager = SnapshotManager::new(size * 2);

        assert!(manager.push(snap.clone()).is_ok());
        assert!(manager.push(snap.clone()).is_ok());
        let err = manager.push(snap).unwrap_err();
        assert!(matches!(err, CounterError::SnapshotLimitExceeded { .. }));
        assert_eq!(manager.len(), 2);

        manager.clear();
        assert!(manager.is_empty());
        assert_eq!(manager.memory_usage(), 0);
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&SnapshotKind::ContributingShown).unwrap();
        assert_eq!(json, "\"contributing-shown\"");
    }
}
