use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// Number of cells across the viewport width the grid aims for
pub const CELLS_ACROSS: f64 = 50.0;

/// A logical cell on the toroidal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel rectangle described by its center and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Grid dimensions derived from a pixel viewport.
///
/// The cell size is a fiftieth of the viewport width; the column and row
/// counts are whatever fits, and `dx`/`dy` stretch cells so the grid covers
/// the viewport exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
    pub cell_size: f64,
    pub nx: i32,
    pub ny: i32,
    pub dx: f64,
    pub dy: f64,
}

impl Geometry {
    pub fn new(width: f64, height: f64) -> Self {
        let mut geometry = Self {
            width: 0.0,
            height: 0.0,
            cell_size: 1.0,
            nx: 1,
            ny: 1,
            dx: 1.0,
            dy: 1.0,
        };
        geometry.resize(width, height);
        geometry
    }

    /// Recompute every derived quantity for a new viewport
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.round().max(1.0);
        self.height = height.round().max(1.0);
        self.cell_size = (self.width / CELLS_ACROSS).round().max(1.0);
        self.nx = ((self.width / self.cell_size).round() as i32).max(1);
        self.ny = ((self.height / self.cell_size).round() as i32).max(1);
        self.dx = self.width / f64::from(self.nx);
        self.dy = self.height / f64::from(self.ny);
    }

    /// Number of cells on the grid
    pub fn cell_count(&self) -> usize {
        self.nx as usize * self.ny as usize
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.nx).contains(&cell.x) && (0..self.ny).contains(&cell.y)
    }

    /// Fold any coordinate pair back onto the grid
    pub fn wrap(&self, x: i32, y: i32) -> Cell {
        Cell::new(x.rem_euclid(self.nx), y.rem_euclid(self.ny))
    }

    /// The neighbouring cell in `direction`, wrapping at every edge
    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        self.wrap(cell.x + dx, cell.y + dy)
    }

    /// Centered pixel rectangle covering `cell`
    pub fn cell_rect(&self, cell: Cell) -> PixelRect {
        PixelRect {
            x: f64::from(cell.x) * self.dx + self.dx / 2.0,
            y: f64::from(cell.y) * self.dy + self.dy / 2.0,
            width: self.dx,
            height: self.dy,
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_viewport() {
        let geometry = Geometry::default();
        assert_eq!(geometry.cell_size, 16.0);
        assert_eq!(geometry.nx, 50);
        // 600 / 16 = 37.5 rounds up
        assert_eq!(geometry.ny, 38);
        assert_eq!(geometry.dx, 16.0);
        assert!((geometry.dy - 600.0 / 38.0).abs() < 1e-9);
    }

    #[test]
    fn test_resize_replaces_derived_fields() {
        let mut geometry = Geometry::default();
        geometry.resize(1000.0, 500.0);
        assert_eq!(geometry.width, 1000.0);
        assert_eq!(geometry.cell_size, 20.0);
        assert_eq!(geometry.nx, 50);
        assert_eq!(geometry.ny, 25);
        assert_eq!(geometry.dy, 20.0);
    }

    #[test]
    fn test_tiny_viewport_keeps_one_cell() {
        let geometry = Geometry::new(10.0, 3.0);
        assert_eq!(geometry.cell_size, 1.0);
        assert_eq!(geometry.nx, 10);
        assert_eq!(geometry.ny, 3);

        let degenerate = Geometry::new(0.0, 0.0);
        assert_eq!(degenerate.nx, 1);
        assert_eq!(degenerate.ny, 1);
    }

    #[test]
    fn test_cell_rect_is_centered() {
        let geometry = Geometry::new(500.0, 500.0);
        let rect = geometry.cell_rect(Cell::new(2, 3));
        assert_eq!(rect.width, 10.0);
        assert_eq!(rect.height, 10.0);
        assert_eq!(rect.x, 25.0);
        assert_eq!(rect.y, 35.0);
    }

    #[test]
    fn test_wraparound_at_every_edge() {
        let geometry = Geometry::default();
        let (nx, ny) = (geometry.nx, geometry.ny);

        assert_eq!(
            geometry.step(Cell::new(0, 5), Direction::Left),
            Cell::new(nx - 1, 5)
        );
        assert_eq!(
            geometry.step(Cell::new(nx - 1, 5), Direction::Right),
            Cell::new(0, 5)
        );
        assert_eq!(
            geometry.step(Cell::new(5, 0), Direction::Up),
            Cell::new(5, ny - 1)
        );
        assert_eq!(
            geometry.step(Cell::new(5, ny - 1), Direction::Down),
            Cell::new(5, 0)
        );
    }

    proptest! {
        #[test]
        fn prop_step_stays_on_grid(
            width in 50.0f64..2000.0,
            height in 50.0f64..2000.0,
            x in 0i32..200,
            y in 0i32..200,
            index in 0usize..4,
        ) {
            let geometry = Geometry::new(width, height);
            let start = geometry.wrap(x, y);
            let next = geometry.step(start, Direction::ALL[index]);
            prop_assert!(geometry.contains(start));
            prop_assert!(geometry.contains(next));
        }
    }
}
