// render.rs - Four-level picture of a stable board

use crate::error::{Result, SandpileError};
use crate::grid::{Cell, Grid};
use egui::Color32;
use image::{Rgb, RgbImage};
use std::path::Path;

/// Colour for a cell holding `grains`: black, two greys, white.
pub fn shade(grains: Cell) -> Color32 {
    match grains {
        ..=0 => Color32::from_rgb(0, 0, 0),
        1 => Color32::from_rgb(85, 85, 85),
        2 => Color32::from_rgb(170, 170, 170),
        _ => Color32::from_rgb(255, 255, 255),
    }
}

/// One pixel per cell; board row `r` becomes image column `x = r` and board
/// column `c` becomes `y = c`. Unstable boards are refused.
pub fn render(grid: &Grid) -> Result<RgbImage> {
    if !grid.is_stable() {
        return Err(SandpileError::InvariantViolation(
            "refusing to render an unstable board".into(),
        ));
    }
    let mut img = RgbImage::new(grid.rows() as u32, grid.cols() as u32);
    for (r, row) in grid.iter_rows().enumerate() {
        for (c, &grains) in row.iter().enumerate() {
            let color = shade(grains);
            img.put_pixel(r as u32, c as u32, Rgb([color.r(), color.g(), color.b()]));
        }
    }
    Ok(img)
}

/// Renders `grid` and writes it as a PNG at `path`.
pub fn save_png<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    render(grid)?.save(path)?;
    Ok(())
}
