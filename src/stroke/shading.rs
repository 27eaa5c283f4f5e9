//! Phong shading of stroke textures from their normal maps

use crate::canvas::color::{Canvas, Rgb};
use crate::canvas::grid::{Grid, Point};
use crate::io::configuration::BLACK_BORDER_STRONG;
use nalgebra::Vector3;

/// Material and light setup for one shaded stroke
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhongParameters {
    /// Ambient strength
    pub ambient: f64,
    /// Diffuse strength
    pub diffuse: f64,
    /// Specular strength
    pub specular: f64,
    /// Specular exponent
    pub shininess: i32,
    /// Direction of the incoming light
    pub light_direction: Vector3<f64>,
    /// Direction towards the observer
    pub observer_direction: Vector3<f64>,
    /// Paint color lit by ambient and diffuse terms
    pub light_color: Rgb,
    /// Highlight color
    pub specular_color: Rgb,
}

impl PhongParameters {
    /// Standard setup lighting paint of `color`
    pub fn for_color(color: Rgb) -> Self {
        Self {
            ambient: 0.5,
            diffuse: 0.5,
            specular: 0.5,
            shininess: 40,
            light_direction: Vector3::new(0.16, 0.16, -0.97),
            observer_direction: Vector3::new(0.0, 0.0, -1.0),
            light_color: color,
            specular_color: Rgb::WHITE,
        }
    }
}

/// Unpack a normal-map pixel into a surface normal
///
/// Red and green span `[-1, 1]`; blue is centered on 128 and points
/// towards the observer (negative z) as it grows.
pub fn unpack_normal(pixel: Rgb) -> Vector3<f64> {
    Vector3::new(
        f64::from(pixel.r) / 255.0 * 2.0 - 1.0,
        f64::from(pixel.g) / 255.0 * 2.0 - 1.0,
        -(f64::from(pixel.b) - 128.0) / 128.0,
    )
}

/// Shade every paint pixel of `texture`; background pixels become white
///
/// Pixels below `BLACK_BORDER_STRONG` are paint. A paint pixel outside the
/// normal map faces the observer.
pub fn shade(texture: &Grid<u8>, normal_map: &Canvas, parameters: &PhongParameters) -> Canvas {
    let light = parameters.light_direction;
    let facing = parameters.observer_direction;

    Grid::from_fn(texture.width(), texture.height(), |point: Point| {
        let is_paint = texture
            .get(point)
            .is_some_and(|&alpha| alpha < BLACK_BORDER_STRONG);
        if !is_paint {
            return Rgb::WHITE;
        }

        let normal = normal_map
            .get(point)
            .map_or(facing, |&pixel| unpack_normal(pixel));
        let diffuse = normal.dot(&light).clamp(0.0, 255.0);
        let reflection = normal * 2.0 * diffuse - light;
        let specular = reflection
            .dot(&parameters.observer_direction)
            .powi(parameters.shininess);

        let channel = |paint: u8, highlight: u8| -> u8 {
            let paint = f64::from(paint);
            let value = parameters.ambient * paint
                + parameters.diffuse * diffuse * paint
                + parameters.specular * specular * f64::from(highlight);
            value.clamp(0.0, 255.0) as u8
        };

        let color = parameters.light_color;
        let highlight = parameters.specular_color;
        Rgb::new(
            channel(color.r, highlight.r),
            channel(color.g, highlight.g),
            channel(color.b, highlight.b),
        )
    })
}
