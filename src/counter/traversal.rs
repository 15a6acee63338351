//! Memoized DFS as an explicit, steppable state machine
//!
//! [`Traversal`] performs the recursive `visit(cell)` descent (right first,
//! then down) without native recursion. Each activation is a [`Frame`] whose
//! [`Phase`] says what happens when control next returns to it, and every
//! observable state change surfaces as a [`Step`] from [`Iterator::next`].
//! Nothing here sleeps: the caller holds each step for its `pause`.
//!
//! # Visit order
//!
//! ```text
//! out of bounds        → 0
//! memo hit             → memo value   (push/pop only, no snapshot)
//! visited, no memo     → 0
//! goal                 → 1            Settled
//! otherwise            → right + down Visiting … Totaled, ContributingShown,
//!                                     Resolved, Cleanup
//! ```

use super::config::GridConfig;
use crate::grid::{Cell, Grid};
use crate::snapshot::{Snapshot, SnapshotKind, Step};
use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};
use std::time::Duration;

/// Mutable traversal state shared by every frame
#[derive(Debug, Clone)]
pub struct Context {
    grid: Grid,
    visited: FxHashSet<Cell>,
    memo: FxHashMap<Cell, u64>,
    stack: Vec<Cell>,
    contributing: FxHashSet<Cell>,
    current: Option<Cell>,
    updating: Option<Cell>,
    answers: FxHashMap<Cell, u64>,
    memo_hits: usize,
}

impl Context {
    pub fn new(grid: Grid) -> Self {
        Context {
            grid,
            visited: FxHashSet::default(),
            memo: FxHashMap::default(),
            stack: Vec::new(),
            contributing: FxHashSet::default(),
            current: None,
            updating: None,
            answers: FxHashMap::default(),
            memo_hits: 0,
        }
    }

    /// Write a memo entry. Entries are write-once.
    fn record_memo(&mut self, cell: Cell, value: u64) {
        let entry = self.memo.entry(cell).or_insert(value);
        debug_assert_eq!(*entry, value, "memo entry for {} changed", cell);
    }

    fn snapshot(&self, kind: SnapshotKind) -> Snapshot {
        Snapshot {
            kind,
            grid_size: self.grid.size(),
            current_cell: self.current,
            updating_cell: self.updating,
            visited: self.visited.iter().copied().collect(),
            stack: self.stack.clone(),
            contributing: self.contributing.iter().copied().collect(),
            answers: self.answers.iter().map(|(&cell, &n)| (cell, n)).collect(),
            memo_hits: self.memo_hits,
        }
    }

    pub fn memo(&self) -> &FxHashMap<Cell, u64> {
        &self.memo
    }

    pub fn stack(&self) -> &[Cell] {
        &self.stack
    }

    pub fn memo_hits(&self) -> usize {
        self.memo_hits
    }
}

/// What a frame does when control returns to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Goal reached; resuming pops it and returns 1
    Settled,
    /// Entered and visited; resuming descends right
    Visiting,
    /// Waiting on the right subtree
    AwaitRight,
    /// Waiting on the down subtree
    AwaitDown { right: u64 },
    /// Total known; resuming shows the contributing neighbours
    Totaled { total: u64 },
    /// Contributors shown; resuming writes the answer
    Shown { total: u64 },
    /// Answer written; resuming pops the frame's cell
    Resolved { total: u64 },
    /// Cleaned up; resuming returns the total to the caller
    Cleaned { total: u64 },
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    cell: Cell,
    phase: Phase,
}

/// One run of the path counter from the origin to the goal
#[derive(Debug, Clone)]
pub struct Traversal {
    ctx: Context,
    step_delay: Duration,
    frames: Vec<Frame>,
    /// Value handed back by the most recently finished call
    returned: Option<u64>,
    started: bool,
    total: Option<u64>,
}

impl Traversal {
    pub fn new(config: GridConfig) -> Self {
        Traversal {
            ctx: Context::new(Grid::new(config.grid_size())),
            step_delay: config.step_delay(),
            frames: Vec::new(),
            returned: None,
            started: false,
            total: None,
        }
    }

    /// Path count, once the traversal has finished
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        self.total.is_some()
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Drain every remaining step and return the path count
    pub fn run_to_end(&mut self) -> u64 {
        for _ in self.by_ref() {}
        self.total.unwrap_or(0)
    }

    /// Advance to the next snapshot, or finish
    fn advance(&mut self) -> Option<Step> {
        if !self.started {
            self.started = true;
            let origin = self.ctx.grid.origin();
            if let Some(step) = self.call(origin) {
                return Some(step);
            }
        }

        loop {
            let Some(&Frame { cell, phase }) = self.frames.last() else {
                if let Some(total) = self.returned.take() {
                    debug!("traversal finished with {} paths", total);
                    self.total = Some(total);
                }
                return None;
            };

            match phase {
                Phase::Settled => {
                    self.ctx.stack.pop();
                    self.finish_frame(1);
                }
                Phase::Visiting => {
                    self.set_phase(Phase::AwaitRight);
                    if let Some(step) = self.call(Cell::new(cell.row, cell.col + 1)) {
                        return Some(step);
                    }
                }
                Phase::AwaitRight => {
                    let right = self.returned.take().unwrap_or(0);
                    self.set_phase(Phase::AwaitDown { right });
                    if let Some(step) = self.call(Cell::new(cell.row + 1, cell.col)) {
                        return Some(step);
                    }
                }
                Phase::AwaitDown { right } => {
                    let down = self.returned.take().unwrap_or(0);
                    let total = right + down;
                    self.ctx.record_memo(cell, total);
                    self.ctx.current = Some(cell);
                    self.set_phase(Phase::Totaled { total });
                    return Some(self.emit(SnapshotKind::Totaled));
                }
                Phase::Totaled { total } => {
                    let grid = self.ctx.grid;
                    self.ctx.contributing.extend(grid.successors(cell));
                    self.set_phase(Phase::Shown { total });
                    return Some(self.emit(SnapshotKind::ContributingShown));
                }
                Phase::Shown { total } => {
                    self.ctx.answers.insert(cell, total);
                    self.ctx.updating = Some(cell);
                    self.set_phase(Phase::Resolved { total });
                    return Some(self.emit(SnapshotKind::Resolved));
                }
                Phase::Resolved { total } => {
                    self.ctx.stack.pop();
                    let grid = self.ctx.grid;
                    for neighbour in grid.successors(cell) {
                        self.ctx.contributing.remove(&neighbour);
                    }
                    self.ctx.updating = None;
                    self.set_phase(Phase::Cleaned { total });
                    return Some(self.emit(SnapshotKind::Cleanup));
                }
                Phase::Cleaned { total } => {
                    self.finish_frame(total);
                }
            }
        }
    }

    /// Begin `visit(cell)`.
    ///
    /// Returns the first snapshot if the call opened a frame; otherwise the
    /// result is left in `returned`.
    fn call(&mut self, cell: Cell) -> Option<Step> {
        let ctx = &mut self.ctx;

        if !ctx.grid.contains(cell) {
            self.returned = Some(0);
            return None;
        }

        if let Some(&value) = ctx.memo.get(&cell) {
            ctx.stack.push(cell);
            ctx.current = Some(cell);
            ctx.stack.pop();
            ctx.memo_hits += 1;
            trace!("memo hit at {} -> {}", cell, value);
            self.returned = Some(value);
            return None;
        }

        // Visited without a memo entry contributes nothing
        if ctx.visited.contains(&cell) {
            self.returned = Some(0);
            return None;
        }

        ctx.stack.push(cell);
        ctx.current = Some(cell);

        if ctx.grid.is_goal(cell) {
            ctx.record_memo(cell, 1);
            ctx.answers.insert(cell, 1);
            ctx.visited.insert(cell);
            self.frames.push(Frame {
                cell,
                phase: Phase::Settled,
            });
            return Some(self.emit(SnapshotKind::Settled));
        }

        ctx.visited.insert(cell);
        self.frames.push(Frame {
            cell,
            phase: Phase::Visiting,
        });
        Some(self.emit(SnapshotKind::Visiting))
    }

    fn finish_frame(&mut self, value: u64) {
        self.frames.pop();
        self.returned = Some(value);
    }

    fn set_phase(&mut self, phase: Phase) {
        if let Some(frame) = self.frames.last_mut() {
            frame.phase = phase;
        }
    }

    fn emit(&self, kind: SnapshotKind) -> Step {
        trace!("{} at {:?}", kind.label(), self.ctx.current);
        Step::new(self.ctx.snapshot(kind), self.step_delay)
    }
}

impl Iterator for Traversal {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.advance()
    }
}
