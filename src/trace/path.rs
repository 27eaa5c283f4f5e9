//! Segmented path assembly
//!
//! A path starts with a disk around the seed that fixes the stroke width,
//! then chains up to `max_segments` straight segments:
//!
//! - The first segment follows the gradient normal at the seed, rotated to
//!   one side or the other depending on the trace direction. Its direction
//!   becomes the stroke's main angle.
//! - Later segments follow the gradient normal at the current skeleton end,
//!   flipped when it would double back on the previous segment. A turn whose
//!   interior angle reaches `TURN_ANGLE_LIMIT` ends the path.
//! - A segment is only committed when its best length exceeds one pixel and,
//!   from the third segment on, when the first segment's share of the total
//!   length is strictly inside `FRACTION_BOUNDS`. The second segment only
//!   records that share.
//!
//! Termination is a normal outcome; the returned path always holds at least
//! the seed.

use crate::canvas::color::{Canvas, Rgb};
use crate::canvas::grid::Point;
use crate::io::configuration::{CONTINUATION_PROBE, FRACTION_BOUNDS, TURN_ANGLE_LIMIT};
use crate::math::geometry::{Rotation, interior_angle, normal_angle, offset, turn_sign};
use crate::math::statistics::MeanColor;
use crate::stroke::descriptor::StrokeDescriptor;
use crate::trace::circle::trace_circle;
use crate::trace::disk::DiskMasks;
use crate::trace::gradient::GradientField;
use crate::trace::linear::{Inherited, longest_within, trace_segments};
use std::collections::HashSet;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Side of the gradient normal explored by a trace
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceDirection {
    /// Normal rotated clockwise
    Forward,
    /// Normal rotated counter-clockwise
    Backward,
}

impl TraceDirection {
    /// Quarter-turn applied to the gradient angle at the seed
    pub const fn rotation(self) -> Rotation {
        match self {
            Self::Forward => Rotation::Clockwise,
            Self::Backward => Rotation::CounterClockwise,
        }
    }
}

/// Why path assembly stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceTermination {
    /// Every allowed segment was committed
    Complete,
    /// No length beyond one pixel stayed within tolerance
    NoExtension,
    /// The continuation turn reached the angle limit
    TurnAngle,
    /// The first segment's share left the fraction bounds
    Fraction,
}

/// Per-generation limits of a trace
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceLimits {
    /// Smallest stroke width tried
    pub min_width: usize,
    /// Largest stroke width tried
    pub max_width: usize,
    /// Longest segment tried
    pub max_length: usize,
    /// Color spread a stroke may accumulate
    pub tolerance: f64,
    /// Maximum number of segments
    pub max_segments: usize,
    /// End paths whose continuation turn reaches the angle limit
    pub validate_turn_angle: bool,
}

/// Direction chosen to continue a path past its current end
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Continuation {
    /// Absolute direction of the next segment (radians)
    pub angle: f64,
    /// Interior angle at the current point, in `[π/2, π]`
    pub interior: f64,
    /// `-1` for a bend to the left in image coordinates, `1` otherwise
    pub sign: f64,
}

impl Continuation {
    /// Pick the continuation at `current` given the raw gradient angle there
    pub fn new(previous: Point, current: Point, gradient_angle: f64) -> Self {
        let mut angle = normal_angle(gradient_angle, Rotation::Clockwise);
        let mut probe = offset(current, angle, CONTINUATION_PROBE);
        let mut interior = interior_angle(previous, current, probe);

        if interior < FRAC_PI_2 {
            interior = PI - interior;
            angle += PI;
            probe = offset(current, angle, CONTINUATION_PROBE);
        }

        let sign = if turn_sign(previous, current, probe) < 0.0 {
            -1.0
        } else {
            1.0
        };

        Self {
            angle,
            interior,
            sign,
        }
    }

    /// Whether the turn stays below `TURN_ANGLE_LIMIT`
    pub fn is_valid(&self) -> bool {
        self.interior % TAU < TURN_ANGLE_LIMIT
    }

    /// Signed interior angle in degrees
    pub fn signed_degrees(&self) -> f64 {
        self.sign * self.interior.to_degrees()
    }
}

/// Result of one path assembly
#[derive(Clone, Debug)]
pub struct TracePath {
    /// Skeleton points from the seed onwards
    pub skeleton: Vec<Point>,
    /// Every pixel covered by the disk and committed segments
    pub points: HashSet<Point>,
    /// Accumulator over `points`
    pub mean: MeanColor,
    /// Color spread of the last committed region
    pub variance: f64,
    /// Direction of the first segment (radians)
    pub main_angle: f64,
    /// Shape features for classification
    pub descriptor: StrokeDescriptor,
    /// Why assembly stopped
    pub termination: TraceTermination,
}

impl TracePath {
    /// Mean color of the covered pixels; white for an empty path
    pub fn mean_color(&self) -> Rgb {
        self.mean.mean().unwrap_or(Rgb::WHITE)
    }

    /// Traced stroke width in pixels
    pub fn width(&self) -> usize {
        self.descriptor.width as usize
    }
}

/// Read-only inputs shared by every trace of a generation
#[derive(Clone, Copy, Debug)]
pub struct PathAssembler<'a> {
    canvas: &'a Canvas,
    gradient: &'a GradientField,
    masks: &'a DiskMasks,
    limits: TraceLimits,
}

impl<'a> PathAssembler<'a> {
    /// Bind the inputs of a generation
    pub const fn new(
        canvas: &'a Canvas,
        gradient: &'a GradientField,
        masks: &'a DiskMasks,
        limits: TraceLimits,
    ) -> Self {
        Self {
            canvas,
            gradient,
            masks,
            limits,
        }
    }

    /// Limits in effect
    pub const fn limits(&self) -> TraceLimits {
        self.limits
    }

    /// Assemble a path from `seed` exploring `direction`
    pub fn assemble(&self, seed: Point, direction: TraceDirection) -> TracePath {
        let limits = self.limits;
        let region = trace_circle(
            self.canvas,
            self.masks,
            seed,
            limits.min_width / 2,
            limits.max_width / 2,
            limits.tolerance,
        );
        let width = region.width();
        let main_angle = normal_angle(self.gradient.angle(seed), direction.rotation());

        let mut skeleton = vec![seed];
        let mut points = region.points;
        let mut mean = region.mean;
        let mut variance = region.variance;
        let mut descriptor = StrokeDescriptor::dab(width as f64);
        let mut first_length = 0.0;
        let mut termination = TraceTermination::Complete;

        for segment in 1..=limits.max_segments {
            let (current, previous) = match skeleton.as_slice() {
                [.., previous, current] => (*current, Some(*previous)),
                [current] => (*current, None),
                [] => break,
            };

            let (angle, bend) = match previous {
                None => (main_angle, None),
                Some(previous) => {
                    let continuation =
                        Continuation::new(previous, current, self.gradient.angle(current));
                    if limits.validate_turn_angle && !continuation.is_valid() {
                        termination = TraceTermination::TurnAngle;
                        break;
                    }
                    (continuation.angle, Some(continuation))
                }
            };

            let inherited = Inherited {
                points: &points,
                mean,
            };
            let candidates = trace_segments(
                self.canvas,
                self.masks,
                current,
                angle,
                width,
                limits.max_length,
                inherited,
            );
            let Some(best) = longest_within(candidates, limits.tolerance) else {
                termination = TraceTermination::NoExtension;
                break;
            };
            if best.length <= 1 {
                termination = TraceTermination::NoExtension;
                break;
            }

            let segment_length = best.length as f64;
            let total = descriptor.length + segment_length;
            if segment == 1 {
                first_length = segment_length;
            } else {
                let fraction = first_length * 100.0 / total;
                let within = fraction > FRACTION_BOUNDS.0 && fraction < FRACTION_BOUNDS.1;
                if segment > 2 && !within {
                    termination = TraceTermination::Fraction;
                    break;
                }
                descriptor.fraction = fraction;
                if let Some(bend) = bend {
                    descriptor.angle = bend.signed_degrees();
                }
            }

            descriptor.length = total;
            descriptor.points += 1;
            points.extend(best.points);
            mean = best.mean;
            variance = best.variance;
            skeleton.push(best.end);
        }

        TracePath {
            skeleton,
            points,
            mean,
            variance,
            main_angle,
            descriptor: descriptor.with_ratio(),
            termination,
        }
    }
}
