// error.rs - Failure taxonomy for seeding, relaxing and rendering a sandpile

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SandpileError {
    /// Startup arguments were missing or could not be parsed.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The board (or a request against it) makes no sense: empty or ragged
    /// grids, out-of-range seed sites, unstable boards handed to the renderer.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    #[error("Failed to build worker runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("Band worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, SandpileError>;
