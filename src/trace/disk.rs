//! Precomputed boolean disk masks keyed by radius
//!
//! The table is built once before any parallel search starts and is only
//! read afterwards, so workers share it by reference without locking.
//! Radii beyond the table are computed on demand and not stored.

use crate::canvas::grid::{Grid, Point};
use bitvec::prelude::{BitVec, bitvec};
use std::borrow::Cow;

/// Square bitmask of side `2r + 1`; bit `(x, y)` is set inside the disk
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiskMask {
    radius: usize,
    bits: BitVec,
}

impl DiskMask {
    /// Rasterize the disk `x² + y² ≤ r²`
    pub fn new(radius: usize) -> Self {
        let side = 2 * radius + 1;
        let mut bits = bitvec![0; side * side];
        let r = radius as i64;
        for y in 0..side {
            for x in 0..side {
                let dx = x as i64 - r;
                let dy = y as i64 - r;
                if dx * dx + dy * dy <= r * r {
                    bits.set(y * side + x, true);
                }
            }
        }
        Self { radius, bits }
    }

    /// Radius of the disk
    pub const fn radius(&self) -> usize {
        self.radius
    }

    /// Offsets from the center covered by the disk
    pub fn offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let side = 2 * self.radius + 1;
        let r = self.radius as i32;
        self.bits
            .iter_ones()
            .map(move |index| ((index % side) as i32 - r, (index / side) as i32 - r))
    }

    /// In-bounds pixels of the disk centered at `center`
    pub fn points_in<T>(&self, grid: &Grid<T>, center: Point) -> Vec<Point> {
        self.offsets()
            .map(|(dx, dy)| center.offset(dx, dy))
            .filter(|point| grid.contains(*point))
            .collect()
    }
}

/// Read-only table of disk masks for radii `0..=max_radius`
#[derive(Clone, Debug)]
pub struct DiskMasks {
    masks: Vec<DiskMask>,
}

impl DiskMasks {
    /// Precompute every radius up to `max_radius`
    pub fn new(max_radius: usize) -> Self {
        Self {
            masks: (0..=max_radius).map(DiskMask::new).collect(),
        }
    }

    /// Largest precomputed radius
    pub fn max_radius(&self) -> usize {
        self.masks.len().saturating_sub(1)
    }

    /// Mask for `radius`, borrowed from the table when available
    pub fn get(&self, radius: usize) -> Cow<'_, DiskMask> {
        self.masks
            .get(radius)
            .map_or_else(|| Cow::Owned(DiskMask::new(radius)), Cow::Borrowed)
    }
}
