//! Point and angle helpers for image coordinates (y grows downward)

use crate::canvas::grid::Point;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Side to which a direction is rotated by a quarter turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    /// Add a quarter turn
    Clockwise,
    /// Subtract a quarter turn
    CounterClockwise,
}

/// Direction perpendicular to `angle`, wrapped into `(-τ, τ)`
pub fn normal_angle(angle: f64, rotation: Rotation) -> f64 {
    let quarter = match rotation {
        Rotation::Clockwise => FRAC_PI_2,
        Rotation::CounterClockwise => -FRAC_PI_2,
    };
    (angle + quarter) % TAU
}

/// Point `length` pixels away along `angle`, truncated toward zero
pub fn offset(point: Point, angle: f64, length: f64) -> Point {
    Point::new(
        point.x + (length * angle.cos()) as i32,
        point.y + (length * angle.sin()) as i32,
    )
}

/// Sub-pixel point `length` pixels away along `angle`
pub fn offset_f(point: Point, angle: f64, length: f64) -> (f64, f64) {
    (
        length.mul_add(angle.cos(), f64::from(point.x)),
        length.mul_add(angle.sin(), f64::from(point.y)),
    )
}

/// Like [`offset`], clamped into `[0, max_x] × [0, max_y]`
pub fn offset_clamped(point: Point, angle: f64, length: f64, max_x: i32, max_y: i32) -> Point {
    let moved = offset(point, angle, length);
    Point::new(moved.x.clamp(0, max_x.max(0)), moved.y.clamp(0, max_y.max(0)))
}

/// Interior angle at `vertex` between the rays to `from` and `to`, in `[0, π]`
///
/// Degenerate rays (zero length) yield `π`, i.e. a straight continuation.
pub fn interior_angle(from: Point, vertex: Point, to: Point) -> f64 {
    let (ax, ay) = (f64::from(from.x - vertex.x), f64::from(from.y - vertex.y));
    let (bx, by) = (f64::from(to.x - vertex.x), f64::from(to.y - vertex.y));
    let lengths = ax.hypot(ay) * bx.hypot(by);
    if lengths == 0.0 {
        return std::f64::consts::PI;
    }
    let cosine = ax.mul_add(bx, ay * by) / lengths;
    cosine.clamp(-1.0, 1.0).acos()
}

/// Sign of the turn `from → vertex → to`: positive, negative or zero
pub fn turn_sign(from: Point, vertex: Point, to: Point) -> f64 {
    let (ax, ay) = (f64::from(vertex.x - from.x), f64::from(vertex.y - from.y));
    let (bx, by) = (f64::from(to.x - vertex.x), f64::from(to.y - vertex.y));
    let cross = ax.mul_add(by, -(ay * bx));
    if cross > 0.0 {
        1.0
    } else if cross < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Rotate `(x, y)` about the origin by `angle`
pub fn rotate(x: f64, y: f64, angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (x.mul_add(cos, -(y * sin)), x.mul_add(sin, y * cos))
}

/// Integer points of the segment `start..=end` (Bresenham)
pub fn line_points(start: Point, end: Point) -> Vec<Point> {
    let dx = (end.x - start.x).abs();
    let dy = -(end.y - start.y).abs();
    let step_x = if start.x < end.x { 1 } else { -1 };
    let step_y = if start.y < end.y { 1 } else { -1 };
    let mut error = dx + dy;
    let mut current = start;
    let mut points = Vec::with_capacity((dx - dy + 1) as usize);

    loop {
        points.push(current);
        if current == end {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            current.x += step_x;
        }
        if doubled <= dx {
            error += dx;
            current.y += step_y;
        }
    }

    points
}
