// relax/parallel.rs - Row-band domain decomposition, one synchronised pass per round
//
// Each round the board's rows are moved out into W disjoint bands. Every band
// is handed by value to its own blocking task, which runs one topple pass and
// stages grains crossing the band edge in a private BoundaryBuffer. Once all
// tasks have been joined, the rows are put back in order and the buffers are
// added onto the seam rows by the calling thread alone.

use super::{Relax, RelaxStats};
use crate::error::{Result, SandpileError};
use crate::grid::{Grid, TRow};
use crate::topple::{BoundaryBuffer, add_rows, topple_pass};
use log::{debug, info};
use tokio::runtime::Runtime;

/// Rows `[index·rows/workers, (index+1)·rows/workers)` owned by band `index`.
pub fn band_bounds(index: usize, workers: usize, rows: usize) -> (usize, usize) {
    (index * rows / workers, (index + 1) * rows / workers)
}

/// What a band worker hands back at the end of its pass.
struct BandOutcome {
    index: usize,
    rows: Vec<TRow>,
    buffer: BoundaryBuffer,
    topples: u64,
}

#[derive(Debug)]
pub struct ParallelRelaxer {
    workers: usize,
    runtime: Runtime,
}

impl ParallelRelaxer {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(SandpileError::InvariantViolation(
                "parallel relaxation needs at least one worker".into(),
            ));
        }
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(workers)
            .max_blocking_threads(workers)
            .thread_name("sandpile-band")
            .build()?;
        Ok(Self { workers, runtime })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Fan out one pass per band, join every worker, then merge the seams.
    fn round(&self, grid: &mut Grid) -> Result<u64> {
        let (n, cols, workers) = (grid.rows(), grid.cols(), self.workers);

        let mut rows = grid.take_rows();
        let mut bands = Vec::with_capacity(workers);
        for index in (0..workers).rev() {
            let (start, _) = band_bounds(index, workers, n);
            bands.push((index, rows.split_off(start)));
        }
        bands.reverse();

        let outcomes = self.runtime.block_on(async {
            let handles: Vec<_> = bands
                .into_iter()
                .map(|(index, mut band)| {
                    let (start, end) = band_bounds(index, workers, n);
                    tokio::task::spawn_blocking(move || {
                        let mut buffer = BoundaryBuffer::for_band(start, end, n, cols);
                        let topples = topple_pass(&mut band, &mut buffer);
                        BandOutcome { index, rows: band, buffer, topples }
                    })
                })
                .collect();

            let mut outcomes = Vec::with_capacity(handles.len());
            for handle in handles {
                outcomes.push(handle.await?);
            }
            Ok::<_, SandpileError>(outcomes)
        })?;

        let mut topples = 0;
        let mut seams = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            topples += outcome.topples;
            rows.extend(outcome.rows);
            seams.push((outcome.index, outcome.buffer));
        }
        // a seam row can collect grains from the bands on both sides of it
        for (index, buffer) in seams {
            let (start, end) = band_bounds(index, workers, n);
            if let Some(top) = buffer.top {
                add_rows(&mut rows[start - 1], &top);
            }
            if let Some(bottom) = buffer.bottom {
                add_rows(&mut rows[end], &bottom);
            }
        }
        grid.restore_rows(rows);
        Ok(topples)
    }
}

impl Relax for ParallelRelaxer {
    fn name(&self) -> &'static str {
        "parallel"
    }

    /// Must not be called from inside an async context: rounds are driven
    /// with `Runtime::block_on`. If a worker panics the board is left empty.
    fn relax(&self, grid: &mut Grid) -> Result<RelaxStats> {
        let mut stats = RelaxStats::default();
        while !grid.is_stable() {
            let topples = self.round(grid)?;
            stats.rounds += 1;
            stats.topples += topples;
            debug!(
                "Parallel round {} over {} bands: {} topples",
                stats.rounds, self.workers, topples
            );
        }
        info!(
            "Parallel relaxation ({} workers) stable after {} rounds, {} topples",
            self.workers, stats.rounds, stats.topples
        );
        Ok(stats)
    }
}
