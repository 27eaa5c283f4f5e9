//! Seed selection strategies
//!
//! The painter asks a `PointDecider` for each stroke's seed and reports every
//! pixel it paints back to it. The default strategy draws uniformly without
//! replacement from the pixels not yet painted in the current generation.

use crate::canvas::grid::Point;
use crate::io::configuration::FIRST_LAYER_FILL;
use bitvec::prelude::{BitVec, bitvec};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Strategy producing stroke seeds for the painter
pub trait PointDecider {
    /// Next seed, or `None` when no seed is left
    fn next_point(&mut self) -> Option<Point>;

    /// Whether the first generation should keep drawing
    fn is_available(&self) -> bool;

    /// Feedback: `point` has just been painted
    fn point_callback(&mut self, point: Point);

    /// Feedback: a placement attempt has finished
    fn post_stroke(&mut self) {}

    /// Start a new generation
    fn reset(&mut self);
}

/// Canvas coordinates not yet painted in the current generation
///
/// Membership is a bitset indexed `y * width + x`. Draws take a random slot
/// of the candidate list and skip slots whose point was already removed, so
/// removal is O(1) and each slot is visited at most once per generation.
#[derive(Clone, Debug)]
pub struct SeedPool {
    width: usize,
    height: usize,
    members: BitVec,
    candidates: Vec<usize>,
    remaining: usize,
    rng: StdRng,
}

impl SeedPool {
    /// Full pool over a `width × height` canvas
    ///
    /// `seed` makes draws reproducible; `None` seeds from the thread RNG.
    pub fn new(width: usize, height: usize, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(
            || StdRng::from_rng(&mut rand::rng()),
            StdRng::seed_from_u64,
        );
        let mut pool = Self {
            width,
            height,
            members: BitVec::new(),
            candidates: Vec::new(),
            remaining: 0,
            rng,
        };
        pool.refill();
        pool
    }

    /// Put every coordinate back
    pub fn refill(&mut self) {
        let size = self.width * self.height;
        self.members = bitvec![1; size];
        self.candidates = (0..size).collect();
        self.remaining = size;
    }

    /// Number of coordinates still in the pool
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Remaining share of the canvas in `[0, 1]`
    pub fn remaining_fraction(&self) -> f64 {
        let size = self.width * self.height;
        if size == 0 {
            return 0.0;
        }
        self.remaining as f64 / size as f64
    }

    /// Whether no coordinate is left
    pub const fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Whether `point` is still in the pool
    pub fn contains(&self, point: Point) -> bool {
        self.index_of(point)
            .is_some_and(|index| self.members.get(index).is_some_and(|bit| *bit))
    }

    /// Remove `point`; returns whether it was present
    pub fn remove(&mut self, point: Point) -> bool {
        let Some(index) = self.index_of(point) else {
            return false;
        };
        if !self.members.get(index).is_some_and(|bit| *bit) {
            return false;
        }
        self.members.set(index, false);
        self.remaining -= 1;
        true
    }

    /// Draw and remove a uniformly random coordinate
    pub fn draw(&mut self) -> Option<Point> {
        while !self.candidates.is_empty() {
            let slot = self.rng.random_range(0..self.candidates.len());
            let index = self.candidates.swap_remove(slot);
            if self.members.get(index).is_some_and(|bit| *bit) {
                self.members.set(index, false);
                self.remaining -= 1;
                return Some(self.point_of(index));
            }
        }
        None
    }

    fn index_of(&self, point: Point) -> Option<usize> {
        let inside = point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height;
        inside.then(|| point.y as usize * self.width + point.x as usize)
    }

    const fn point_of(&self, index: usize) -> Point {
        Point::new((index % self.width) as i32, (index / self.width) as i32)
    }
}

/// Uniform random seeds without replacement
#[derive(Clone, Debug)]
pub struct RandomPointDecider {
    pool: SeedPool,
}

impl RandomPointDecider {
    /// Decider over a `width × height` canvas
    pub fn new(width: usize, height: usize, seed: Option<u64>) -> Self {
        Self {
            pool: SeedPool::new(width, height, seed),
        }
    }

    /// Underlying seed pool
    pub const fn pool(&self) -> &SeedPool {
        &self.pool
    }
}

impl PointDecider for RandomPointDecider {
    fn next_point(&mut self) -> Option<Point> {
        self.pool.draw()
    }

    fn is_available(&self) -> bool {
        !self.pool.is_empty() && self.pool.remaining_fraction() > FIRST_LAYER_FILL
    }

    fn point_callback(&mut self, point: Point) {
        self.pool.remove(point);
    }

    fn reset(&mut self) {
        self.pool.refill();
    }
}
