// relax/mod.rs - Strategies that topple a board until it is stable

mod parallel;
mod recursive;
mod serial;

pub use parallel::{ParallelRelaxer, band_bounds};
pub use recursive::RecursiveRelaxer;
pub use serial::SerialRelaxer;

use crate::error::Result;
use crate::grid::Grid;

/// Work done by one relaxation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelaxStats {
    /// Whole-board passes (serial) or rounds (parallel). Zero for the cascade.
    pub rounds: u64,
    pub topples: u64,
}

/// Mutates a board in place until `Grid::is_stable` holds.
pub trait Relax {
    fn name(&self) -> &'static str;
    fn relax(&self, grid: &mut Grid) -> Result<RelaxStats>;
}
