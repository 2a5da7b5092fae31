// main.rs - Seed a sandpile, relax it, and write the stable board as PNG

use anyhow::Context;
use log::{info, warn};
use rand::{SeedableRng, rngs::StdRng};
use sandpile::config::{RunConfig, Strategy};
use sandpile::render::save_png;
use sandpile::seed::CASCADE_POOL_SIZE;
use sandpile::{BoardInitializer, Grid, ParallelRelaxer, RecursiveRelaxer, Relax, SerialRelaxer};
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = RunConfig::from_args(std::env::args().skip(1)).context("Reading arguments")?;
    let size = config.board_size()?;
    let rng_seed: u64 = rand::random();
    info!(
        "Board {size}x{size}, {} grains, mode '{}', {} workers, rng seed {rng_seed}",
        config.total_grains, config.mode, config.workers
    );
    let mut rng = StdRng::seed_from_u64(rng_seed);

    match config.strategy {
        Strategy::Compare => {
            let mut parallel = Grid::square(size)?;
            BoardInitializer::default().seed(&mut parallel, config.total_grains, &config.mode, &mut rng);
            let mut serial = parallel.clone();

            let relaxer = ParallelRelaxer::new(config.workers).context("Starting band workers")?;
            run(&relaxer, &mut parallel, "parallel.png")?;

            info!("Now computing serially...");
            run(&SerialRelaxer, &mut serial, "serial.png")?;

            if parallel != serial {
                warn!("Serial and parallel boards differ");
            }
        }
        Strategy::Recursive => {
            let mut grid = Grid::square(size)?;
            let sites = BoardInitializer::with_pool_size(CASCADE_POOL_SIZE).seed(
                &mut grid,
                config.total_grains,
                &config.mode,
                &mut rng,
            );
            run(&RecursiveRelaxer::new(sites), &mut grid, "sandpiles.png")?;
        }
    }
    Ok(())
}

fn run(relaxer: &dyn Relax, grid: &mut Grid, path: &str) -> anyhow::Result<()> {
    let start = Instant::now();
    let stats = relaxer
        .relax(grid)
        .with_context(|| format!("Running {} relaxation", relaxer.name()))?;
    info!(
        "Time taken for {}: {:?} ({} rounds, {} topples)",
        relaxer.name(),
        start.elapsed(),
        stats.rounds,
        stats.topples
    );
    save_png(grid, path).with_context(|| format!("Writing {path}"))?;
    info!("Wrote {path}");
    Ok(())
}
