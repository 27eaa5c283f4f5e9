//! Raster conversion between `image` buffers and painter grids

use crate::canvas::color::{Canvas, Rgb};
use crate::canvas::grid::{Grid, Point};
use crate::io::error::{PainterError, Result};
use image::{GrayImage, Luma, RgbImage};
use std::path::Path;

/// Decode any supported image file into an RGB canvas
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn load_canvas(path: &Path) -> Result<Canvas> {
    let image = image::open(path).map_err(|e| PainterError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(canvas_from_rgb(&image.to_rgb8()))
}

/// Save a canvas, format chosen by extension
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_canvas(canvas: &Canvas, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| PainterError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    rgb_from_canvas(canvas)
        .save(path)
        .map_err(|e| PainterError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Copy an RGB buffer into a canvas
pub fn canvas_from_rgb(image: &RgbImage) -> Canvas {
    Grid::from_fn(image.width() as usize, image.height() as usize, |point| {
        image
            .get_pixel_checked(point.x as u32, point.y as u32)
            .map_or(Rgb::WHITE, |&pixel| Rgb::from(pixel))
    })
}

/// Copy a canvas into an RGB buffer
pub fn rgb_from_canvas(canvas: &Canvas) -> RgbImage {
    RgbImage::from_fn(canvas.width() as u32, canvas.height() as u32, |x, y| {
        canvas
            .get(Point::new(x as i32, y as i32))
            .copied()
            .unwrap_or(Rgb::WHITE)
            .into()
    })
}

/// Copy a grayscale buffer into a grid
pub fn grid_from_gray(image: &GrayImage) -> Grid<u8> {
    Grid::from_fn(image.width() as usize, image.height() as usize, |point| {
        image
            .get_pixel_checked(point.x as u32, point.y as u32)
            .map_or(u8::MAX, |pixel| pixel.0[0])
    })
}

/// Copy a grid into a grayscale buffer
pub fn gray_from_grid(grid: &Grid<u8>) -> GrayImage {
    GrayImage::from_fn(grid.width() as u32, grid.height() as u32, |x, y| {
        Luma([grid
            .get(Point::new(x as i32, y as i32))
            .copied()
            .unwrap_or(u8::MAX)])
    })
}
