//! Per-placement stroke instances
//!
//! A classified template copy is scaled to the traced size, optionally
//! shaded, and rotated onto the traced main angle. The instance owns every
//! buffer it uses and is dropped once the placement is scored or painted.

use crate::canvas::color::{Canvas, Rgb};
use crate::canvas::grid::{Grid, Point};
use crate::io::configuration::{BLACK_BORDER_MEDIUM, MAX_CANVAS_DIMENSION, SHADING_BRIGHTNESS};
use crate::io::image::{canvas_from_rgb, gray_from_grid, grid_from_gray, rgb_from_canvas};
use crate::math::geometry::rotate;
use crate::stroke::descriptor::StrokeDescriptor;
use crate::stroke::shading::{PhongParameters, shade};
use crate::stroke::template::{StrokeTemplate, find_pivot};
use image::imageops::{self, FilterType};
use std::f64::consts::FRAC_PI_2;

/// Traced dimension a template is scaled to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizeMode {
    /// Match the traced width
    #[default]
    Width,
    /// Match the traced length
    Length,
    /// Average of the width and length factors
    Middle,
}

impl ResizeMode {
    /// Scale factor taking `template` to `traced`
    ///
    /// A dimension the template lacks (zero or non-finite ratio) scales by 1.
    pub fn coefficient(self, traced: &StrokeDescriptor, template: &StrokeDescriptor) -> f64 {
        let ratio = |target: f64, source: f64| {
            let value = target / source;
            if source > 0.0 && value.is_finite() && value > 0.0 {
                value
            } else {
                1.0
            }
        };
        let width = ratio(traced.width, template.width);
        let length = ratio(traced.length, template.length);
        match self {
            Self::Width => width,
            Self::Length => length,
            Self::Middle => f64::midpoint(width, length),
        }
    }
}

/// Placement-ready stroke: alpha texture, optional shaded colors, anchor
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeInstance {
    texture: Grid<u8>,
    shaded: Option<Canvas>,
    pivot: Point,
    descriptor: StrokeDescriptor,
}

/// How a template is turned into an instance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceRequest {
    /// Descriptor of the traced path
    pub traced: StrokeDescriptor,
    /// Mean color of the traced region
    pub color: Rgb,
    /// Direction of the first segment (radians)
    pub main_angle: f64,
    /// Traced dimension to match
    pub resize_mode: ResizeMode,
    /// Whether bright strokes with normal maps are shaded
    pub shading: bool,
}

impl StrokeInstance {
    /// Resize, shade and rotate `template` for one placement
    pub fn prepare(template: StrokeTemplate, request: &InstanceRequest) -> Self {
        let coefficient = request
            .resize_mode
            .coefficient(&request.traced, &template.descriptor);
        let texture = resize_alpha(&template.texture, coefficient);

        let shaded = if request.shading && request.color.brightness() > SHADING_BRIGHTNESS {
            template.normal_map.as_ref().map(|normal_map| {
                let normal_map = resize_color(normal_map, texture.width(), texture.height());
                shade(&texture, &normal_map, &PhongParameters::for_color(request.color))
            })
        } else {
            None
        };

        Self {
            texture,
            shaded,
            pivot: Point::default(),
            descriptor: template.descriptor,
        }
        .rotated(request.main_angle)
    }

    /// Instance from an already oriented texture
    pub const fn from_parts(
        texture: Grid<u8>,
        shaded: Option<Canvas>,
        pivot: Point,
        descriptor: StrokeDescriptor,
    ) -> Self {
        Self {
            texture,
            shaded,
            pivot,
            descriptor,
        }
    }

    /// Rotate so the texture's downward axis points along `main_angle`
    ///
    /// The pivot is recomputed on the unrotated texture and carried along.
    /// Uncovered corners become background.
    pub fn rotated(self, main_angle: f64) -> Self {
        let angle = main_angle - FRAC_PI_2;
        let anchor = find_pivot(&self.texture);
        let (texture, pivot) = rotate_grid(&self.texture, angle, u8::MAX, anchor);
        let shaded = self
            .shaded
            .as_ref()
            .map(|shaded| rotate_grid(shaded, angle, Rgb::WHITE, anchor).0);
        Self {
            texture,
            shaded,
            pivot,
            descriptor: self.descriptor,
        }
    }

    /// Alpha texture (0 = paint, 255 = background)
    pub const fn texture(&self) -> &Grid<u8> {
        &self.texture
    }

    /// Shaded colors, when shading applied
    pub const fn shaded(&self) -> Option<&Canvas> {
        self.shaded.as_ref()
    }

    /// Anchor aligned with the stroke start on the canvas
    pub const fn pivot(&self) -> Point {
        self.pivot
    }

    /// Descriptor of the source template
    pub const fn descriptor(&self) -> &StrokeDescriptor {
        &self.descriptor
    }

    /// Local coordinates and alpha of every paint pixel
    pub fn paint_pixels(&self) -> impl Iterator<Item = (Point, u8)> + '_ {
        self.texture
            .iter()
            .filter(|(_, alpha)| **alpha < BLACK_BORDER_MEDIUM)
            .map(|(point, alpha)| (point, *alpha))
    }
}

fn scaled_dimension(size: usize, coefficient: f64) -> u32 {
    let scaled = (size as f64 * coefficient).ceil();
    scaled.clamp(1.0, f64::from(MAX_CANVAS_DIMENSION)) as u32
}

/// Scale an alpha texture by `coefficient` (bicubic)
pub fn resize_alpha(texture: &Grid<u8>, coefficient: f64) -> Grid<u8> {
    let coefficient = coefficient.clamp(0.001, 100_000.0);
    if (coefficient - 1.0).abs() < f64::EPSILON || texture.is_empty() {
        return texture.clone();
    }
    let width = scaled_dimension(texture.width(), coefficient);
    let height = scaled_dimension(texture.height(), coefficient);
    let resized = imageops::resize(&gray_from_grid(texture), width, height, FilterType::CatmullRom);
    grid_from_gray(&resized)
}

/// Scale a color raster to exactly `width × height` (bicubic)
pub fn resize_color(canvas: &Canvas, width: usize, height: usize) -> Canvas {
    if (canvas.width() == width && canvas.height() == height) || canvas.is_empty() {
        return canvas.clone();
    }
    let resized = imageops::resize(
        &rgb_from_canvas(canvas),
        width.max(1) as u32,
        height.max(1) as u32,
        FilterType::CatmullRom,
    );
    canvas_from_rgb(&resized)
}

/// Rotate `grid` by `angle` about its center into an enlarged grid
///
/// Nearest-neighbour sampling; cells with no source become `fill`. Returns
/// the rotated grid and the image of `anchor`.
pub fn rotate_grid<T: Clone>(grid: &Grid<T>, angle: f64, fill: T, anchor: Point) -> (Grid<T>, Point) {
    let (sin, cos) = angle.sin_cos();
    let (width, height) = (grid.width() as f64, grid.height() as f64);
    let span = |extent: f64| (extent - 1e-9).ceil().max(1.0) as usize;
    let new_width = span(cos.abs().mul_add(width, sin.abs() * height));
    let new_height = span(cos.abs().mul_add(height, sin.abs() * width));

    let center = ((width - 1.0) / 2.0, (height - 1.0) / 2.0);
    let new_center = ((new_width as f64 - 1.0) / 2.0, (new_height as f64 - 1.0) / 2.0);

    let rotated = Grid::from_fn(new_width, new_height, |point| {
        let (u, v) = rotate(
            f64::from(point.x) - new_center.0,
            f64::from(point.y) - new_center.1,
            -angle,
        );
        let source = Point::new((u + center.0).round() as i32, (v + center.1).round() as i32);
        grid.get(source).cloned().unwrap_or_else(|| fill.clone())
    });

    let (x, y) = rotate(
        f64::from(anchor.x) - center.0,
        f64::from(anchor.y) - center.1,
        angle,
    );
    let moved = Point::new(
        (x + new_center.0).round() as i32,
        (y + new_center.1).round() as i32,
    );

    (rotated, moved)
}
