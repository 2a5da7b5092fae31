// grid.rs - Sandpile board and its stability predicate

use crate::error::{Result, SandpileError};

/// Grain count held by one cell. Signed so that a negative pile handed to the
/// initializer is stored as given rather than rejected.
pub type Cell = i64;

/// A cell at or above this value topples, one grain to each of its 4 neighbours.
pub const TOPPLE_THRESHOLD: Cell = 4;

pub type TRow = Vec<Cell>;

/// N×M board of grain counts, stored row by row so contiguous row bands can be
/// lent out to workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<TRow>,
    cols: usize,
}

impl Grid {
    /// All-zero `rows`×`cols` board. A board with no cells is rejected.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(SandpileError::InvariantViolation(format!(
                "cannot build a {rows}x{cols} board"
            )));
        }
        Ok(Self { rows: vec![vec![0; cols]; rows], cols })
    }

    /// All-zero square board.
    pub fn square(size: usize) -> Result<Self> {
        Self::new(size, size)
    }

    pub fn from_rows(rows: Vec<TRow>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || cols == 0 {
            return Err(SandpileError::InvariantViolation("empty board".into()));
        }
        if let Some(bad) = rows.iter().position(|row| row.len() != cols) {
            return Err(SandpileError::InvariantViolation(format!(
                "row {bad} has {} cells, expected {cols}",
                rows[bad].len()
            )));
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Panics when `(row, col)` lies outside the board.
    pub fn set(&mut self, row: usize, col: usize, value: Cell) {
        self.rows[row][col] = value;
    }

    /// Panics when `(row, col)` lies outside the board.
    pub fn add(&mut self, row: usize, col: usize, grains: Cell) {
        self.rows[row][col] += grains;
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols
    }

    /// True iff no cell holds `TOPPLE_THRESHOLD` grains or more.
    pub fn is_stable(&self) -> bool {
        self.rows.iter().flatten().all(|&v| v < TOPPLE_THRESHOLD)
    }

    pub fn total_grains(&self) -> Cell {
        self.rows.iter().flatten().sum()
    }

    /// Number of cells holding 0, 1, 2 and 3-or-more grains.
    pub fn level_counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for &v in self.rows.iter().flatten() {
            counts[v.clamp(0, 3) as usize] += 1;
        }
        counts
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [TRow] {
        &mut self.rows
    }

    /// Moves every row out, leaving the board empty until `restore_rows`.
    pub(crate) fn take_rows(&mut self) -> Vec<TRow> {
        std::mem::take(&mut self.rows)
    }

    pub(crate) fn restore_rows(&mut self, rows: Vec<TRow>) {
        debug_assert!(rows.iter().all(|r| r.len() == self.cols));
        self.rows = rows;
    }
}
