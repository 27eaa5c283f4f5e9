//! Oriented rectangle covering one straight stroke segment

use crate::canvas::grid::Point;
use crate::math::geometry::{Rotation, normal_angle, offset_f};

/// Rectangle of a given width spanning `start → end`
///
/// Corners run around the perimeter: start-left, end-left, end-right,
/// start-right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedRectangle {
    corners: [(f64, f64); 4],
}

impl OrientedRectangle {
    /// Build the rectangle whose long axis is the segment `start → end`
    pub fn new(start: Point, end: Point, width: usize) -> Self {
        let half = (width / 2) as f64;
        let angle = f64::from(end.y - start.y).atan2(f64::from(end.x - start.x));
        let left = normal_angle(angle, Rotation::Clockwise);
        let right = normal_angle(angle, Rotation::CounterClockwise);

        Self {
            corners: [
                offset_f(start, left, half),
                offset_f(end, left, half),
                offset_f(end, right, half),
                offset_f(start, right, half),
            ],
        }
    }

    /// Corner coordinates in perimeter order
    pub const fn corners(&self) -> [(f64, f64); 4] {
        self.corners
    }

    /// Integer box `(min, max)` enclosing every corner
    pub fn bounding_box(&self) -> (Point, Point) {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (x, y) in self.corners {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        (
            Point::new(min_x.floor() as i32, min_y.floor() as i32),
            Point::new(max_x.ceil() as i32, max_y.ceil() as i32),
        )
    }

    /// Whether `point` lies strictly inside the polygon
    ///
    /// A degenerate rectangle (zero width or length) contains nothing.
    pub fn contains(&self, point: Point) -> bool {
        let (px, py) = (f64::from(point.x), f64::from(point.y));
        let mut positive = false;
        let mut negative = false;

        let next = self.corners.iter().cycle().skip(1);
        for (&(ax, ay), &(bx, by)) in self.corners.iter().zip(next) {
            let cross = (bx - ax).mul_add(py - ay, -((by - ay) * (px - ax)));
            if cross > f64::EPSILON {
                positive = true;
            } else if cross < -f64::EPSILON {
                negative = true;
            } else {
                return false;
            }
        }

        positive != negative
    }

    /// Every integer point strictly inside, in row-major bounding-box order
    pub fn interior_points(&self) -> impl Iterator<Item = Point> + '_ {
        let (min, max) = self.bounding_box();
        (min.y..=max.y)
            .flat_map(move |y| (min.x..=max.x).map(move |x| Point::new(x, y)))
            .filter(|point| self.contains(*point))
    }
}
