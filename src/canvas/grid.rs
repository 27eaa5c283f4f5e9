//! Generic 2D grid with bounds-checked access
//!
//! Every raster in the painter (source and render canvases, gradient angles,
//! stroke textures, occupancy maps) is a `Grid<T>`. Storage is an ndarray
//! `Array2` in row-major `[y, x]` order; the public API speaks `Point`s with
//! signed coordinates so callers can probe outside the grid without casts.

use ndarray::{Array2, Axis, Slice};
use num_traits::Zero;

/// Integer pixel coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Point {
    /// Create a point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Dense width × height grid of `T`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Array2<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid filled with `value`
    pub fn new(width: usize, height: usize, value: T) -> Self {
        Self {
            cells: Array2::from_elem((height, width), value),
        }
    }

    /// Overwrite every cell with `value`
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Copy mirrored left to right
    pub fn flip_horizontal(&self) -> Self {
        let mut cells = self.cells.clone();
        cells.invert_axis(Axis(1));
        Self { cells }
    }

    /// Copy of the inclusive rectangle `[min, max]`, clamped to the grid
    pub fn crop(&self, min: Point, max: Point) -> Self {
        let x0 = min.x.max(0) as usize;
        let y0 = min.y.max(0) as usize;
        let x1 = (max.x.max(0) as usize).min(self.width().saturating_sub(1));
        let y1 = (max.y.max(0) as usize).min(self.height().saturating_sub(1));
        let (rows, columns) = if self.is_empty() || x0 > x1 || y0 > y1 {
            (Slice::from(0_usize..0), Slice::from(0_usize..0))
        } else {
            (Slice::from(y0..=y1), Slice::from(x0..=x1))
        };
        let mut view = self.cells.view();
        view.slice_axis_inplace(Axis(0), rows);
        view.slice_axis_inplace(Axis(1), columns);
        Self {
            cells: view.to_owned(),
        }
    }
}

impl<T: Clone + Zero> Grid<T> {
    /// Create a zero-filled grid
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::zeros((height, width)),
        }
    }
}

impl<T> Grid<T> {
    /// Wrap an existing `[y, x]` array
    pub const fn from_array(cells: Array2<T>) -> Self {
        Self { cells }
    }

    /// Build a grid by evaluating `f` at every point
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(Point) -> T) -> Self {
        Self {
            cells: Array2::from_shape_fn((height, width), |(y, x)| {
                f(Point::new(x as i32, y as i32))
            }),
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total cell count
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `point` addresses a cell
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width()
            && (point.y as usize) < self.height()
    }

    /// Cell at `point`, or `None` outside the grid
    pub fn get(&self, point: Point) -> Option<&T> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        self.cells.get([point.y as usize, point.x as usize])
    }

    /// Mutable cell at `point`, or `None` outside the grid
    pub fn get_mut(&mut self, point: Point) -> Option<&mut T> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        self.cells.get_mut([point.y as usize, point.x as usize])
    }

    /// Write `value` at `point`; returns `false` outside the grid
    pub fn set(&mut self, point: Point, value: T) -> bool {
        self.get_mut(point).map(|cell| *cell = value).is_some()
    }

    /// Cell at the nearest valid coordinate (replicate border)
    ///
    /// Returns `None` only for an empty grid.
    pub fn get_clamped(&self, x: i64, y: i64) -> Option<&T> {
        let max_x = self.width().checked_sub(1)? as i64;
        let max_y = self.height().checked_sub(1)? as i64;
        self.cells
            .get([y.clamp(0, max_y) as usize, x.clamp(0, max_x) as usize])
    }

    /// Row-major iterator over every coordinate
    pub fn points(&self) -> impl Iterator<Item = Point> + use<T> {
        let width = self.width();
        let height = self.height();
        (0..height).flat_map(move |y| (0..width).map(move |x| Point::new(x as i32, y as i32)))
    }

    /// Row-major iterator over coordinates and cells
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.cells
            .indexed_iter()
            .map(|((y, x), value)| (Point::new(x as i32, y as i32), value))
    }

    /// Apply `f` to every cell
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            cells: self.cells.map(f),
        }
    }

    /// Underlying `[y, x]` array
    pub const fn as_array(&self) -> &Array2<T> {
        &self.cells
    }

    /// Consume into the underlying `[y, x]` array
    pub fn into_array(self) -> Array2<T> {
        self.cells
    }
}
