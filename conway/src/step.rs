// step.rs - Transition rule and generation stepping

use crate::grid::Grid;
use crate::neighbors::{BoundaryCondition, count_live_neighbors};

/// Conway's B3/S23 rule.
#[inline]
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    match (alive, live_neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3)            => true, // Birth
        _                     => false, // Death or stays dead
    }
}

/// Fill `out` with row `y` of the next generation, reading only `current`.
fn process_row(current: &Grid, y: usize, boundary: BoundaryCondition, out: &mut [bool]) {
    for (x, cell) in out.iter_mut().enumerate() {
        let count = count_live_neighbors(current, x, y, boundary);
        *cell = next_state(current.is_alive(x, y), count);
    }
}

/// Produce the next generation into a fresh grid of the same dimensions.
pub fn next_generation(current: &Grid, boundary: BoundaryCondition) -> Grid {
    let mut next = Grid::new(current.rows(), current.cols());
    for (y, row) in next.rows_iter_mut().enumerate() {
        process_row(current, y, boundary, row);
    }
    next
}
