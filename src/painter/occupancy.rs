//! Region-occupancy tracking for stroke boundary and skeleton export
//!
//! Every painted canvas pixel keeps a stack of the strokes that covered it,
//! topmost last. When a stroke is painted over, its visible pixel count
//! drops; once less than `VISIBILITY_FRACTION` of it remains it is removed
//! from every stack and from the export.

use crate::canvas::color::{Canvas, Rgb};
use crate::canvas::grid::{Grid, Point};
use crate::io::configuration::{BLACK_BORDER_MEDIUM, VISIBILITY_FRACTION};
use crate::math::geometry::line_points;
use std::collections::BTreeMap;

/// Identifier of a tracked stroke, starting at 1
pub type StrokeId = u32;

/// Part of a stroke a pixel belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelRole {
    /// On the stroke outline
    Edge,
    /// Inside the stroke
    Filler,
}

/// Role of `local` in an alpha texture: an edge when any 4-neighbour is
/// background or outside the texture
pub fn pixel_role(texture: &Grid<u8>, local: Point) -> PixelRole {
    let is_paint = |point: Point| {
        texture
            .get(point)
            .is_some_and(|&alpha| alpha < BLACK_BORDER_MEDIUM)
    };
    let neighbours = [(1, 0), (-1, 0), (0, 1), (0, -1)];
    if neighbours
        .iter()
        .all(|&(dx, dy)| is_paint(local.offset(dx, dy)))
    {
        PixelRole::Filler
    } else {
        PixelRole::Edge
    }
}

/// Bookkeeping of one tracked stroke
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrokeRecord {
    /// Traced mean color
    pub color: Rgb,
    /// Skeleton points on the canvas
    pub skeleton: Vec<Point>,
    /// Pixels painted by the stroke
    pub initial_size: usize,
    /// Pixels still on top
    pub current_size: usize,
}

impl StrokeRecord {
    /// Share of the stroke still visible
    pub fn visible_fraction(&self) -> f64 {
        if self.initial_size == 0 {
            return 1.0;
        }
        self.current_size as f64 / self.initial_size as f64
    }
}

/// Per-pixel stroke ownership over a canvas
#[derive(Clone, Debug)]
pub struct OccupancyTracker {
    owners: Grid<Vec<(StrokeId, PixelRole)>>,
    records: BTreeMap<StrokeId, StrokeRecord>,
    current: StrokeId,
}

impl OccupancyTracker {
    /// Empty tracker for a `width × height` canvas
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            owners: Grid::new(width, height, Vec::new()),
            records: BTreeMap::new(),
            current: 0,
        }
    }

    /// Start tracking a new stroke; later pixels belong to it
    pub fn open_stroke(&mut self, color: Rgb, skeleton: Vec<Point>) -> StrokeId {
        self.current += 1;
        self.records.insert(
            self.current,
            StrokeRecord {
                color,
                skeleton,
                initial_size: 0,
                current_size: 0,
            },
        );
        self.current
    }

    /// Record that the open stroke covered `point`
    pub fn add_pixel(&mut self, point: Point, role: PixelRole) {
        let current = self.current;
        let Some(stack) = self.owners.get_mut(point) else {
            return;
        };
        let covered = stack.last().map(|&(id, _)| id).filter(|&id| id != current);
        stack.push((current, role));

        if let Some(record) = self.records.get_mut(&current) {
            record.initial_size += 1;
            record.current_size += 1;
        }

        if let Some(id) = covered {
            let hidden = self.records.get_mut(&id).is_some_and(|record| {
                record.current_size = record.current_size.saturating_sub(1);
                record.visible_fraction() < VISIBILITY_FRACTION
            });
            if hidden {
                self.remove_stroke(id);
            }
        }
    }

    fn remove_stroke(&mut self, id: StrokeId) {
        let points: Vec<Point> = self.owners.points().collect();
        for point in points {
            if let Some(stack) = self.owners.get_mut(point) {
                stack.retain(|&(owner, _)| owner != id);
            }
        }
        self.records.remove(&id);
    }

    /// Strokes still tracked, by id
    pub const fn records(&self) -> &BTreeMap<StrokeId, StrokeRecord> {
        &self.records
    }

    /// Topmost stroke at `point`
    pub fn owner(&self, point: Point) -> Option<StrokeId> {
        self.owners
            .get(point)
            .and_then(|stack| stack.last())
            .map(|&(id, _)| id)
    }

    /// Outline canvas: each pixel shows its topmost stroke's color when it is
    /// on that stroke's edge, white otherwise
    pub fn shapes_canvas(&self) -> Canvas {
        self.owners.map(|stack| {
            stack
                .last()
                .filter(|(_, role)| *role == PixelRole::Edge)
                .and_then(|(id, _)| self.records.get(id))
                .map_or(Rgb::WHITE, |record| record.color)
        })
    }

    /// Skeleton canvas: every tracked stroke's skeleton drawn in its color
    pub fn skeleton_canvas(&self) -> Canvas {
        let mut canvas = Canvas::new(self.owners.width(), self.owners.height(), Rgb::WHITE);
        for record in self.records.values() {
            if let [dab] = record.skeleton.as_slice() {
                canvas.set(*dab, record.color);
            }
            for pair in record.skeleton.windows(2) {
                if let [start, end] = pair {
                    for point in line_points(*start, *end) {
                        canvas.set(point, record.color);
                    }
                }
            }
        }
        canvas
    }
}
