// error.rs - Error taxonomy for the automaton core

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// An edit or pointer position fell outside `[0, cols) x [0, rows)`.
    #[error("cell ({x}, {y}) is outside the {cols}x{rows} grid")]
    OutOfBoundsEdit { x: i64, y: i64, cols: usize, rows: usize },

    #[error("invalid step interval {0:?}: expected a positive number of milliseconds")]
    InvalidIntervalConfig(String),

    #[error("canvas {width_px}x{height_px} px with {cell_size_px} px cells holds no grid")]
    InvalidGeometry { width_px: u32, height_px: u32, cell_size_px: u32 },

    #[error("unknown boundary condition {0:?} (expected \"fixed\" or \"periodic\")")]
    UnknownBoundary(String),
}
