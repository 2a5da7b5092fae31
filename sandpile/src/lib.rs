// lib.rs - Abelian sandpile: seeding, three relaxation strategies, rendering

pub mod config;
pub mod error;
pub mod grid;
pub mod relax;
pub mod render;
pub mod seed;
pub mod topple;

pub use config::{RunConfig, Strategy};
pub use error::{Result, SandpileError};
pub use grid::{Cell, Grid, TOPPLE_THRESHOLD};
pub use relax::{ParallelRelaxer, RecursiveRelaxer, Relax, RelaxStats, SerialRelaxer};
pub use seed::{BoardInitializer, SeedMode};
