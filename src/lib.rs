//! # Introduction
//!
//! gridpaths counts the monotone (right/down) paths across an N×N grid with a
//! memoized depth-first search, and exposes every step of that search as a
//! [`snapshot::Snapshot`] so it can be animated.  Snapshots are played back
//! and navigated forward and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui), or written out as JSON lines.
//!
//! ## Execution pipeline
//!
//! ```text
//! GridConfig → PathCounter → Traversal → Steps (snapshot + pause) → TUI / JSON
//! ```
//!
//! 1. [`grid`] — cell coordinates and N×N bounds arithmetic.
//! 2. [`counter`] — configuration, the `visit` state machine and the
//!    [`counter::PathCounter`] control surface with generation-tagged
//!    cancellation.
//! 3. [`snapshot`] — snapshot records, the cell role priority used for
//!    coloring, and a bounded snapshot history.
//! 4. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Counting rule
//!
//! From `(row, col)` a path may move to `(row, col + 1)` or `(row + 1, col)`.
//! The count for an N×N grid is the central binomial coefficient
//! C(2(N-1), N-1): 1, 2, 6, 20, 70, ...

pub mod counter;
pub mod grid;
pub mod snapshot;
pub mod ui;
