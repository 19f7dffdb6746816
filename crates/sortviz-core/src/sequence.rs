//! The list being sorted.
//!
//! A [`Sequence`] owns its [`Cell`]s outright. Its length only changes through
//! [`Sequence::generate`] and [`Sequence::clear`]; every sorting operation
//! works through [`Sequence::swap`] and [`Sequence::set`] and leaves the length
//! untouched.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::cell::Cell;

/// Exclusive upper bound for generated values.
pub const DEFAULT_VALUE_CEILING: u32 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    cells: Vec<Cell>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `n` independent uniform values in `[0, ceiling)`.
    pub fn generate<R: Rng + ?Sized>(&mut self, n: usize, ceiling: u32, rng: &mut R) {
        let ceiling = ceiling.max(1);
        self.cells.clear();
        self.cells
            .extend((0..n).map(|_| Cell::new(rng.random_range(0..ceiling))));
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Overwrite the cell at `index`. Out-of-range writes are ignored.
    pub fn set(&mut self, index: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = cell;
        }
    }

    /// Swap two cells.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.cells.swap(i, j);
    }

    /// Fisher–Yates re-ordering of the current cells.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cells.shuffle(rng);
    }

    /// Sort ascending in one shot, no steps reported.
    pub fn sort_instant(&mut self) {
        self.cells.sort();
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn values(&self) -> Vec<u32> {
        self.cells.iter().map(Cell::value).collect()
    }

    pub fn is_sorted(&self) -> bool {
        self.cells.windows(2).all(|w| w[0] <= w[1])
    }
}

impl From<Vec<u32>> for Sequence {
    fn from(values: Vec<u32>) -> Self {
        Self {
            cells: values.into_iter().map(Cell::new).collect(),
        }
    }
}

impl From<&[u32]> for Sequence {
    fn from(values: &[u32]) -> Self {
        values.to_vec().into()
    }
}
