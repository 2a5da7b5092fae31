// relax/recursive.rs - Depth-first topple cascade grown outward from seed sites
//
// Each stack frame is one cell being drained. A frame topples its cell, then
// walks up, down, left, right; after feeding a neighbour it stops and lets the
// neighbour's frame run to completion before moving on to the next direction.
// This reproduces an eager recursive cascade without growing the call stack.

use super::{Relax, RelaxStats};
use crate::error::{Result, SandpileError};
use crate::grid::{Grid, TOPPLE_THRESHOLD};
use log::{debug, info};

const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

struct Frame {
    row: usize,
    col: usize,
    /// Next entry of `DIRECTIONS` to feed; `None` before the cell's next topple.
    next_dir: Option<usize>,
}

impl Frame {
    fn new(row: usize, col: usize) -> Self {
        Self { row, col, next_dir: None }
    }
}

/// Relaxes only what is reachable from its seed sites; the board is never
/// rescanned. Seeds are drained in order.
#[derive(Debug, Clone, Default)]
pub struct RecursiveRelaxer {
    seeds: Vec<(usize, usize)>,
}

impl RecursiveRelaxer {
    pub fn new(seeds: Vec<(usize, usize)>) -> Self {
        Self { seeds }
    }

    pub fn seeds(&self) -> &[(usize, usize)] {
        &self.seeds
    }

    fn cascade(grid: &mut Grid, seed: (usize, usize)) -> u64 {
        let mut topples = 0;
        let mut stack = vec![Frame::new(seed.0, seed.1)];
        let (rows, cols) = (grid.rows(), grid.cols());

        while let Some(frame) = stack.last_mut() {
            let (row, col) = (frame.row, frame.col);
            let dir = match frame.next_dir {
                Some(dir) => dir,
                None => {
                    let cell = &mut grid.rows_mut()[row][col];
                    if *cell < TOPPLE_THRESHOLD {
                        stack.pop();
                        continue;
                    }
                    *cell -= TOPPLE_THRESHOLD;
                    topples += 1;
                    0
                }
            };
            if dir == DIRECTIONS.len() {
                // all four fed; go round again while the cell is still unstable
                frame.next_dir = None;
                continue;
            }
            frame.next_dir = Some(dir + 1);

            let (dr, dc) = DIRECTIONS[dir];
            let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
                continue;
            };
            if nr < rows && nc < cols {
                grid.add(nr, nc, 1);
                stack.push(Frame::new(nr, nc));
            }
        }
        topples
    }
}

impl Relax for RecursiveRelaxer {
    fn name(&self) -> &'static str {
        "recursive"
    }

    /// Leaves the board stable only when every unstable cell is reachable
    /// from a seed; with several interacting seeds the result is not
    /// promised to match the whole-board relaxers.
    fn relax(&self, grid: &mut Grid) -> Result<RelaxStats> {
        if let Some(&(r, c)) = self.seeds.iter().find(|&&(r, c)| !grid.contains(r, c)) {
            return Err(SandpileError::InvariantViolation(format!(
                "seed ({r}, {c}) lies outside the {}x{} board",
                grid.rows(),
                grid.cols()
            )));
        }
        let mut stats = RelaxStats::default();
        for &seed in &self.seeds {
            let topples = Self::cascade(grid, seed);
            debug!("Cascade from {seed:?}: {topples} topples");
            stats.topples += topples;
        }
        info!(
            "Recursive relaxation from {} seeds finished after {} topples",
            self.seeds.len(),
            stats.topples
        );
        Ok(stats)
    }
}
