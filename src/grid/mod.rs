//! Grid geometry
//!
//! This module provides the coordinate model shared by the counter and the UI:
//! - [`Cell`]: an immutable `(row, col)` coordinate, usable as a map/set key
//! - [`Grid`]: an N×N space with no stored cells, only bounds arithmetic
//!
//! # Movement
//!
//! Paths are monotone: from `(row, col)` the only moves are
//! ```text
//! right  →  (row, col + 1)
//! down   →  (row + 1, col)
//! ```
//! Neighbour helpers return `None` when the move leaves the grid, so callers
//! never have to bounds-check twice.

use serde::{Serialize, Serializer};
use std::fmt;

/// A 0-indexed grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// Canonical `"row,col"` key
    pub fn key(&self) -> String {
        format!("{},{}", self.row, self.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// Serialized as the canonical key so cells can be JSON map keys
impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

/// An N×N grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: usize,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Grid { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.size * self.size
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.size && cell.col < self.size
    }

    /// Top-left cell, where every run starts
    pub fn origin(&self) -> Cell {
        Cell::new(0, 0)
    }

    /// Bottom-right cell
    pub fn goal(&self) -> Cell {
        let last = self.size.saturating_sub(1);
        Cell::new(last, last)
    }

    pub fn is_goal(&self, cell: Cell) -> bool {
        self.size > 0 && cell == self.goal()
    }

    /// The cell one column to the right, if it is on the grid
    pub fn right(&self, cell: Cell) -> Option<Cell> {
        let next = Cell::new(cell.row, cell.col + 1);
        self.contains(next).then_some(next)
    }

    /// The cell one row down, if it is on the grid
    pub fn down(&self, cell: Cell) -> Option<Cell> {
        let next = Cell::new(cell.row + 1, cell.col);
        self.contains(next).then_some(next)
    }

    /// In-bounds right and down neighbours, right first
    pub fn successors(&self, cell: Cell) -> impl Iterator<Item = Cell> {
        [self.right(cell), self.down(cell)].into_iter().flatten()
    }
}
