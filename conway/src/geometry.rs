// geometry.rs - Mapping between canvas pixels and grid cells

use crate::error::LifeError;
use crate::grid::Coordinate;

pub const DEFAULT_CELL_SIZE_PX: u32 = 20;
pub const DEFAULT_WIDTH_PX: u32 = 800;
pub const DEFAULT_HEIGHT_PX: u32 = 600;

/// Pixel canvas carved into square cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasGeometry {
    pub width_px: u32,
    pub height_px: u32,
    pub cell_size_px: u32,
}

impl Default for CanvasGeometry {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_WIDTH_PX,
            height_px: DEFAULT_HEIGHT_PX,
            cell_size_px: DEFAULT_CELL_SIZE_PX,
        }
    }
}

impl CanvasGeometry {
    /// `(rows, cols)` of the board. Fails if no whole cell fits.
    pub fn dimensions(&self) -> Result<(usize, usize), LifeError> {
        let invalid = || LifeError::InvalidGeometry {
            width_px: self.width_px,
            height_px: self.height_px,
            cell_size_px: self.cell_size_px,
        };
        if self.cell_size_px == 0 {
            return Err(invalid());
        }
        let rows = (self.height_px / self.cell_size_px) as usize;
        let cols = (self.width_px / self.cell_size_px) as usize;
        if rows == 0 || cols == 0 {
            return Err(invalid());
        }
        Ok((rows, cols))
    }

    /// Cell under a pointer offset relative to the canvas origin.
    ///
    /// Bounds are exclusive: an offset exactly on the right or bottom edge
    /// of the board is outside it.
    pub fn cell_at(&self, offset_x: f32, offset_y: f32) -> Result<Coordinate, LifeError> {
        let (rows, cols) = self.dimensions()?;
        let size = self.cell_size_px as f32;
        let to_index = |offset: f32| -> i64 {
            if offset.is_finite() { (offset / size).floor() as i64 } else { -1 }
        };
        let (x, y) = (to_index(offset_x), to_index(offset_y));

        if x < 0 || y < 0 || x >= cols as i64 || y >= rows as i64 {
            return Err(LifeError::OutOfBoundsEdit { x, y, cols, rows });
        }
        Ok(Coordinate::new(x as usize, y as usize))
    }

    /// `(left, top, side)` in pixels of the square drawn for a live cell,
    /// inset by one pixel so the lattice stays visible.
    pub fn cell_rect(&self, cell: Coordinate) -> (f32, f32, f32) {
        let size = self.cell_size_px as f32;
        (
            size * cell.x as f32 + 1.0,
            size * cell.y as f32 + 1.0,
            (size - 1.0).max(0.0),
        )
    }

    pub fn board_size(&self) -> (f32, f32) {
        (self.width_px as f32, self.height_px as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_canvas_is_40_by_30() {
        assert_eq!(CanvasGeometry::default().dimensions(), Ok((30, 40)));
    }

    #[test]
    fn partial_cells_are_dropped() {
        let geometry = CanvasGeometry { width_px: 95, height_px: 41, cell_size_px: 20 };
        assert_eq!(geometry.dimensions(), Ok((2, 4)));
    }

    #[test]
    fn rejects_empty_boards() {
        for (w, h, c) in [(800, 600, 0), (10, 600, 20), (800, 0, 20)] {
            let geometry = CanvasGeometry { width_px: w, height_px: h, cell_size_px: c };
            assert!(matches!(geometry.dimensions(), Err(LifeError::InvalidGeometry { .. })));
        }
    }

    #[test]
    fn cell_at_floors_offsets() {
        let geometry = CanvasGeometry::default();
        assert_eq!(geometry.cell_at(0.0, 0.0), Ok(Coordinate::new(0, 0)));
        assert_eq!(geometry.cell_at(19.9, 39.0), Ok(Coordinate::new(0, 1)));
        assert_eq!(geometry.cell_at(799.5, 599.5), Ok(Coordinate::new(39, 29)));
    }

    #[test]
    fn cell_at_uses_exclusive_upper_bounds() {
        let geometry = CanvasGeometry::default();
        assert_eq!(
            geometry.cell_at(800.0, 10.0),
            Err(LifeError::OutOfBoundsEdit { x: 40, y: 0, cols: 40, rows: 30 })
        );
        assert!(geometry.cell_at(10.0, 600.0).is_err());
        assert!(geometry.cell_at(-0.5, 10.0).is_err());
        assert!(geometry.cell_at(f32::NAN, 10.0).is_err());
    }

    #[test]
    fn cell_rect_is_inset_by_one_pixel() {
        let geometry = CanvasGeometry::default();
        assert_eq!(geometry.cell_rect(Coordinate::new(2, 3)), (41.0, 61.0, 19.0));
    }
}
