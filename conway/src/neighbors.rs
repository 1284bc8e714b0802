// neighbors.rs - Moore-neighborhood counting under a boundary condition

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LifeError;
use crate::grid::Grid;

/// Neighbor offsets as `(dy, dx)`, clockwise from the upper-left.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, 1),
    (1, 1),   (1, 0),  (1, -1), (0, -1),
];

/// Edge policy for neighbor lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryCondition {
    /// Cells outside the board are permanently dead.
    Fixed,
    /// The board wraps around on both axes (torus).
    #[default]
    Periodic,
}

impl BoundaryCondition {
    pub const ALL: [BoundaryCondition; 2] = [BoundaryCondition::Fixed, BoundaryCondition::Periodic];

    /// Map `coord + delta` onto `[0, len)`, or `None` if it lies outside a fixed edge.
    #[inline]
    fn resolve(self, coord: usize, delta: isize, len: usize) -> Option<usize> {
        match self {
            BoundaryCondition::Fixed => coord.checked_add_signed(delta).filter(|&c| c < len),
            BoundaryCondition::Periodic => {
                let len = len as isize;
                Some((coord as isize + delta).rem_euclid(len) as usize)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BoundaryCondition::Fixed => "Fixed BC",
            BoundaryCondition::Periodic => "Periodic BC",
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryCondition::Fixed => f.write_str("fixed"),
            BoundaryCondition::Periodic => f.write_str("periodic"),
        }
    }
}

impl FromStr for BoundaryCondition {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(BoundaryCondition::Fixed),
            "periodic" => Ok(BoundaryCondition::Periodic),
            _ => Err(LifeError::UnknownBoundary(s.to_string())),
        }
    }
}

/// Number of live cells among the 8 neighbors of `(x, y)`, in `[0, 8]`.
///
/// Under [`BoundaryCondition::Periodic`] all 8 offsets are looked up, so on
/// a 1x1 board a live cell counts itself 8 times.
pub fn count_live_neighbors(grid: &Grid, x: usize, y: usize, boundary: BoundaryCondition) -> u8 {
    let (rows, cols) = (grid.rows(), grid.cols());
    if rows == 0 || cols == 0 {
        return 0;
    }

    let mut count = 0;
    for &(dy, dx) in &NEIGHBOR_OFFSETS {
        let Some(ny) = boundary.resolve(y, dy, rows) else { continue };
        let Some(nx) = boundary.resolve(x, dx, cols) else { continue };
        if grid.is_alive(nx, ny) {
            count += 1;
        }
    }
    count
}
