use crate::bit_grid::{BitGrid, GRID_SIZE};
use crate::error::ImportError;
use image::DynamicImage;
use image::imageops::FilterType;
use std::path::Path;

/// Luma values below this turn a cell on.
pub const THRESHOLD: u8 = 128;

/// ITU-R 601-2 luma, in integer thousandths.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
}

/// Shrinks an image of any size to 32x32 and thresholds it: dark pixels
/// become lit cells, light pixels stay off.
pub fn bitmap_from_image(image: &DynamicImage) -> BitGrid {
    let size = GRID_SIZE as u32;
    let rgb = image
        .resize_exact(size, size, FilterType::Lanczos3)
        .to_rgb8();

    let mut grid = BitGrid::new();
    for (col, row, pixel) in rgb.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        grid.set(row as usize, col as usize, luma(r, g, b) < THRESHOLD);
    }
    grid
}

pub fn load_image(path: &Path) -> Result<BitGrid, ImportError> {
    if path.as_os_str().is_empty() {
        return Err(ImportError::NoPath);
    }
    if !path.exists() {
        return Err(ImportError::Missing(path.to_path_buf()));
    }
    let image = image::open(path).map_err(|source| ImportError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "decoded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(bitmap_from_image(&image))
}
