// relax/serial.rs - Whole-board iterative toppling on the calling thread

use super::{Relax, RelaxStats};
use crate::error::Result;
use crate::grid::Grid;
use crate::topple::{BoundaryBuffer, topple_pass};
use log::{debug, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct SerialRelaxer;

impl Relax for SerialRelaxer {
    fn name(&self) -> &'static str {
        "serial"
    }

    fn relax(&self, grid: &mut Grid) -> Result<RelaxStats> {
        let mut stats = RelaxStats::default();
        // the whole board is one band with no neighbours to spill into
        let mut lossy = BoundaryBuffer::lossy();
        while !grid.is_stable() {
            let topples = topple_pass(grid.rows_mut(), &mut lossy);
            stats.rounds += 1;
            stats.topples += topples;
            debug!("Serial pass {}: {} topples", stats.rounds, topples);
        }
        info!(
            "Serial relaxation stable after {} passes, {} topples",
            stats.rounds, stats.topples
        );
        Ok(stats)
    }
}
