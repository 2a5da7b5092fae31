// main.rs - Interactive view of a sandpile board before and after relaxation

use anyhow::Context;
use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use log::{error, info};
use rand::{SeedableRng, rngs::StdRng};
use sandpile::render::shade;
use sandpile::seed::CASCADE_POOL_SIZE;
use sandpile::{
    BoardInitializer, Grid, ParallelRelaxer, RecursiveRelaxer, Relax, RelaxStats, RunConfig,
    SerialRelaxer,
};

const BOARD_PIXELS: f32 = 750.0;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RunConfig::from_args(std::env::args().skip(1)).context("Reading arguments")?;
    let app = SandpileApp::new(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sandpile Display",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[derive(Clone, Copy)]
enum RelaxerKind {
    Serial,
    Parallel,
    Cascade,
}

struct SandpileApp {
    seeded: Grid,
    cascade_seeded: Grid,
    grid: Grid,
    parallel: ParallelRelaxer,
    cascade: RecursiveRelaxer,
    last_run: Option<(&'static str, RelaxStats)>,
    status: String,
    show_grid_lines: bool,
}

impl SandpileApp {
    fn new(config: &RunConfig) -> anyhow::Result<Self> {
        let size = config.board_size()?;
        let rng_seed: u64 = rand::random();
        info!("Seeding {size}x{size} board with rng seed {rng_seed}");
        let mut rng = StdRng::seed_from_u64(rng_seed);

        let mut seeded = Grid::square(size)?;
        BoardInitializer::default().seed(&mut seeded, config.total_grains, &config.mode, &mut rng);

        let mut cascade_seeded = Grid::square(size)?;
        let cascade_sites = BoardInitializer::with_pool_size(CASCADE_POOL_SIZE).seed(
            &mut cascade_seeded,
            config.total_grains,
            &config.mode,
            &mut rng,
        );

        Ok(Self {
            grid: seeded.clone(),
            seeded,
            cascade_seeded,
            parallel: ParallelRelaxer::new(config.workers)?,
            cascade: RecursiveRelaxer::new(cascade_sites),
            last_run: None,
            status: String::new(),
            show_grid_lines: size <= 60,
        })
    }

    fn run(&mut self, kind: RelaxerKind) {
        let serial = SerialRelaxer;
        let (relaxer, start): (&dyn Relax, &Grid) = match kind {
            RelaxerKind::Serial => (&serial, &self.seeded),
            RelaxerKind::Parallel => (&self.parallel, &self.seeded),
            RelaxerKind::Cascade => (&self.cascade, &self.cascade_seeded),
        };
        let name = relaxer.name();
        let mut grid = start.clone();
        match relaxer.relax(&mut grid) {
            Ok(stats) => {
                self.last_run = Some((name, stats));
                self.status.clear();
            }
            Err(e) => {
                error!("{name} relaxation failed: {e}");
                self.last_run = None;
                self.status = e.to_string();
            }
        }
        self.grid = grid;
    }
}

impl eframe::App for SandpileApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!("{}x{} Sandpile", self.grid.rows(), self.grid.cols()));

            ui.horizontal(|ui| {
                if ui.button("Relax Serial").clicked() {
                    self.run(RelaxerKind::Serial);
                }

                if ui.button("Relax Parallel").clicked() {
                    self.run(RelaxerKind::Parallel);
                }

                if ui.button("Recursive Cascade").clicked() {
                    self.run(RelaxerKind::Cascade);
                }

                if ui.button("Reset").clicked() {
                    self.grid = self.seeded.clone();
                    self.last_run = None;
                    self.status.clear();
                }

                ui.separator();
                ui.checkbox(&mut self.show_grid_lines, "Grid lines");
            });

            ui.separator();

            match self.last_run {
                Some((name, stats)) => ui.label(format!(
                    "{name}: {} rounds, {} topples",
                    stats.rounds, stats.topples
                )),
                None => ui.label("Seeded board (cells at 3 or more grains show white)"),
            };
            if !self.status.is_empty() {
                ui.colored_label(Color32::RED, self.status.as_str());
            }

            ui.separator();

            // Draw the board, one box per cell
            let rows = self.grid.rows();
            let cols = self.grid.cols();
            let spacing = if self.show_grid_lines { 0.5 } else { 0.0 };
            let box_size = (BOARD_PIXELS / rows.max(cols) as f32 - spacing).max(0.5);

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(
                (box_size + spacing) * cols as f32,
                (box_size + spacing) * rows as f32,
            );

            let (_response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());

            painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

            for (row, cells) in self.grid.iter_rows().enumerate() {
                for (col, &grains) in cells.iter().enumerate() {
                    if grains <= 0 && !self.show_grid_lines {
                        continue;
                    }
                    let x = start_pos.x + col as f32 * (box_size + spacing);
                    let y = start_pos.y + row as f32 * (box_size + spacing);
                    let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                    painter.rect_filled(rect, 0.0, shade(grains));
                    if self.show_grid_lines {
                        painter.rect_stroke(rect, 0.0, Stroke::new(0.3, Color32::GRAY));
                    }
                }
            }

            ui.separator();

            let [zero, one, two, three] = self.grid.level_counts();
            ui.horizontal(|ui| {
                ui.label(format!("Total grains: {}", self.grid.total_grains()));
                ui.label(format!("0: {zero}  1: {one}  2: {two}  3+: {three}"));
                ui.label(if self.grid.is_stable() { "Stable" } else { "Unstable" });
            });
        });
    }
}
