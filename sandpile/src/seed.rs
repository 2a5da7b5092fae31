// seed.rs - Initial grain placement

use crate::grid::{Cell, Grid};
use log::{debug, warn};
use rand::Rng;
use std::fmt;

/// Candidate-site pool drawn for whole-board runs.
pub const RANDOM_POOL_SIZE: usize = 100;
/// Candidate-site pool drawn for the recursive cascade run.
pub const CASCADE_POOL_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedMode {
    /// Whole pile on the centre cell.
    Central,
    /// Grains spread over a fixed pool of random sites.
    Random,
    /// Any other name: seeding leaves the board as it is.
    Unrecognized(String),
}

impl SeedMode {
    pub fn parse(name: &str) -> Self {
        match name {
            "central" => SeedMode::Central,
            "random" => SeedMode::Random,
            other => SeedMode::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for SeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedMode::Central => f.write_str("central"),
            SeedMode::Random => f.write_str("random"),
            SeedMode::Unrecognized(name) => f.write_str(name),
        }
    }
}

/// Places grains on a fresh board. The random source is passed in so a run
/// can be replayed from a fixed seed.
#[derive(Debug, Clone, Copy)]
pub struct BoardInitializer {
    pool_size: usize,
}

impl Default for BoardInitializer {
    fn default() -> Self {
        Self { pool_size: RANDOM_POOL_SIZE }
    }
}

impl BoardInitializer {
    pub fn with_pool_size(pool_size: usize) -> Self {
        Self { pool_size }
    }

    /// Seeds `grid` with `total_grains` grains and returns the sites that were
    /// chosen: the centre for `Central`, the full candidate pool (in draw order,
    /// duplicates kept) for `Random`, nothing otherwise.
    ///
    /// `Random` draws the whole pool first, then hands each grain to a pool
    /// entry picked uniformly; the pool is never redrawn per grain. A negative
    /// `total_grains` is stored as-is in `Central` mode and places nothing in
    /// `Random` mode.
    pub fn seed<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        total_grains: Cell,
        mode: &SeedMode,
        rng: &mut R,
    ) -> Vec<(usize, usize)> {
        if total_grains < 0 {
            warn!("Seeding with a negative pile of {total_grains} grains");
        }
        match mode {
            SeedMode::Central => {
                let centre = (grid.rows() / 2, grid.cols() / 2);
                grid.set(centre.0, centre.1, total_grains);
                debug!("Placed {total_grains} grains at {centre:?}");
                vec![centre]
            }
            SeedMode::Random => {
                if self.pool_size == 0 {
                    warn!("Random seeding with an empty site pool places nothing");
                    return Vec::new();
                }
                let pool: Vec<(usize, usize)> = (0..self.pool_size)
                    .map(|_| {
                        (rng.random_range(0..grid.rows()), rng.random_range(0..grid.cols()))
                    })
                    .collect();
                for _ in 0..total_grains {
                    let (r, c) = pool[rng.random_range(0..pool.len())];
                    grid.add(r, c, 1);
                }
                debug!("Spread {total_grains} grains over {} sites", pool.len());
                pool
            }
            SeedMode::Unrecognized(name) => {
                warn!("Unknown seeding mode '{name}', board left empty");
                Vec::new()
            }
        }
    }
}
