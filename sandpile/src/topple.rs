// topple.rs - Per-cell topple rule and one pass over a band of rows

use crate::grid::{Cell, TOPPLE_THRESHOLD, TRow};

/// Worker-private overflow rows for one band. A side is `None` when the band
/// touches the top or bottom edge of the board: grains sent that way are lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryBuffer {
    pub top: Option<TRow>,
    pub bottom: Option<TRow>,
}

impl BoundaryBuffer {
    /// Buffer for a band that has the whole board to itself.
    pub fn lossy() -> Self {
        Self { top: None, bottom: None }
    }

    /// Zeroed buffer for the band `[start, end)` of a board with `rows` rows of
    /// width `cols`. Empty bands never overflow.
    pub fn for_band(start: usize, end: usize, rows: usize, cols: usize) -> Self {
        let nonempty = start < end;
        Self {
            top: (nonempty && start > 0).then(|| vec![0; cols]),
            bottom: (nonempty && end < rows).then(|| vec![0; cols]),
        }
    }
}

/// Topples `band[r][c]` once if it is at or above threshold. Increments that
/// would leave the band go to `buffer` (or are lost); column-edge increments are
/// always lost. Returns whether a topple happened.
#[inline]
pub fn topple_cell(band: &mut [TRow], r: usize, c: usize, buffer: &mut BoundaryBuffer) -> bool {
    if band[r][c] < TOPPLE_THRESHOLD {
        return false;
    }
    band[r][c] -= TOPPLE_THRESHOLD;

    if r > 0 {
        band[r - 1][c] += 1;
    } else if let Some(top) = buffer.top.as_mut() {
        top[c] += 1;
    }
    if r + 1 < band.len() {
        band[r + 1][c] += 1;
    } else if let Some(bottom) = buffer.bottom.as_mut() {
        bottom[c] += 1;
    }

    let row = &mut band[r];
    if c > 0 {
        row[c - 1] += 1;
    }
    if c + 1 < row.len() {
        row[c + 1] += 1;
    }
    true
}

/// One row-major pass over `band`, applying each topple immediately so a cell
/// toppled early can feed one visited later. Returns the number of topples.
pub fn topple_pass(band: &mut [TRow], buffer: &mut BoundaryBuffer) -> u64 {
    let mut topples = 0;
    for r in 0..band.len() {
        for c in 0..band[r].len() {
            if topple_cell(band, r, c, buffer) {
                topples += 1;
            }
        }
    }
    topples
}

/// Element-wise `row += overflow`.
pub fn add_rows(row: &mut [Cell], overflow: &[Cell]) {
    for (cell, extra) in row.iter_mut().zip(overflow) {
        *cell += extra;
    }
}
