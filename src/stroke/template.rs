//! Library stroke templates

use crate::canvas::color::Canvas;
use crate::canvas::grid::{Grid, Point};
use crate::io::configuration::{BLACK_BORDER_MEDIUM, PIVOT_ROW};
use crate::stroke::descriptor::StrokeDescriptor;

/// Cropped grayscale brush texture with its shape descriptor
///
/// Texture values are alpha: 0 is opaque paint and 255 is background. The
/// stroke runs down the texture from its top row, so rotating by
/// `main_angle - π/2` lines it up with a traced path.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeTemplate {
    /// Alpha texture
    pub texture: Grid<u8>,
    /// Optional normal map registered with `texture`
    pub normal_map: Option<Canvas>,
    /// Shape features in canvas pixels
    pub descriptor: StrokeDescriptor,
}

impl StrokeTemplate {
    /// Template without a normal map
    pub const fn new(texture: Grid<u8>, descriptor: StrokeDescriptor) -> Self {
        Self {
            texture,
            normal_map: None,
            descriptor,
        }
    }

    /// Attach a normal map
    pub fn with_normal_map(mut self, normal_map: Canvas) -> Self {
        self.normal_map = Some(normal_map);
        self
    }

    /// Left-right mirror image, including the normal map
    ///
    /// The descriptor's bend angle changes sign.
    pub fn mirrored(&self) -> Self {
        let mut descriptor = self.descriptor;
        descriptor.angle = -descriptor.angle;
        Self {
            texture: self.texture.flip_horizontal(),
            normal_map: self.normal_map.as_ref().map(Grid::flip_horizontal),
            descriptor,
        }
    }
}

/// Anchor of a texture: the middle of the paint run on `PIVOT_ROW`, at row 0
///
/// The scanned row is clamped to the texture; a row without paint spans
/// the full width.
pub fn find_pivot(texture: &Grid<u8>) -> Point {
    let width = texture.width() as i32;
    let row = PIVOT_ROW.min(texture.height().saturating_sub(1)) as i32;
    let is_paint = |x: i32| {
        texture
            .get(Point::new(x, row))
            .is_some_and(|&alpha| alpha <= BLACK_BORDER_MEDIUM)
    };

    let left = (0..width).find(|&x| is_paint(x)).unwrap_or(0);
    let right = (1..width).rev().find(|&x| is_paint(x)).unwrap_or(width);
    Point::new((left + right) / 2, 0)
}
