// grid.rs - Grid state for Conway's Game of Life

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FILL_PROBABILITY: f64 = 0.5;

/// Column/row position on the board. `x` indexes columns, `y` indexes rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// `rows x cols` matrix of cells, stored row-major. `true` is alive.
///
/// Dimensions are fixed at construction; every edit keeps them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// All cells dead.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![false; rows * cols] }
    }

    /// Build a grid with the given cells alive. Coordinates off the board are skipped.
    pub fn with_live_cells(rows: usize, cols: usize, live: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(rows, cols);
        for &(x, y) in live {
            if let Some(idx) = grid.index_of(x, y) {
                grid.cells[idx] = true;
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.cols && y < self.rows
    }

    #[inline]
    fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        self.contains(x, y).then(|| y * self.cols + x)
    }

    /// Liveness at `(x, y)`. Off-board cells read as dead.
    #[inline]
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.index_of(x, y).is_some_and(|idx| self.cells[idx])
    }

    /// Flip one cell. Returns `false` and leaves the grid untouched when
    /// `(x, y)` is off the board.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        match self.index_of(x, y) {
            Some(idx) => {
                self.cells[idx] = !self.cells[idx];
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Set each cell alive independently with probability `probability`.
    ///
    /// The probability is clamped to `[0, 1]`; a non-finite value falls
    /// back to [`DEFAULT_FILL_PROBABILITY`].
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, probability: f64) {
        let p = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            DEFAULT_FILL_PROBABILITY
        };
        for cell in &mut self.cells {
            *cell = rng.gen_bool(p);
        }
    }

    /// Live cells in row-major order (y ascending, then x ascending).
    pub fn live_cells(&self) -> Vec<Coordinate> {
        self.rows_iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &alive)| alive)
                    .map(move |(x, _)| Coordinate::new(x, y))
            })
            .collect()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn rows_iter(&self) -> impl Iterator<Item = &[bool]> {
        // chunks(0) panics; a zero-column grid has no rows to yield anyway
        self.cells.chunks(self.cols.max(1))
    }

    pub(crate) fn rows_iter_mut(&mut self) -> impl Iterator<Item = &mut [bool]> {
        self.cells.chunks_mut(self.cols.max(1))
    }
}
