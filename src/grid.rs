use rand::Rng;

use crate::input::Direction;

/// Grid position in pixel units.
///
/// Valid positions are multiples of the cell size and lie inside the grid
/// extents; [`Grid::step`] preserves both properties.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Toroidal playing field measured in pixels and divided into square cells.
///
/// Built once from a validated [`GameConfig`](crate::config::GameConfig) and
/// shared by reference; it carries no mutable state.
///
/// Validation caps both extents at `i32::MAX`, so the pixel arithmetic
/// below never overflows.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    width: u32,
    height: u32,
    cell_size: u32,
}

impl Grid {
    /// Creates a grid without validation. Callers go through
    /// [`GameConfig::grid`](crate::config::GameConfig::grid) outside tests.
    pub(crate) fn new_unchecked(width: u32, height: u32, cell_size: u32) -> Self {
        debug_assert!(cell_size > 0 && width % cell_size == 0 && height % cell_size == 0);
        Self {
            width,
            height,
            cell_size,
        }
    }

    #[must_use]
    pub fn width(self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn cell_size(self) -> u32 {
        self.cell_size
    }

    /// Number of cells per row.
    #[must_use]
    pub fn columns(self) -> u32 {
        self.width / self.cell_size
    }

    /// Number of cells per column.
    #[must_use]
    pub fn rows(self) -> u32 {
        self.height / self.cell_size
    }

    #[must_use]
    pub fn total_cells(self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Cell-aligned centre of the grid, used as the snake spawn point.
    #[must_use]
    pub fn center(self) -> Position {
        self.position_of_cell(self.columns() / 2, self.rows() / 2)
    }

    /// Returns true when `position` is a cell origin inside the extents.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        let cell = self.cell_size as i32;
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
            && position.x % cell == 0
            && position.y % cell == 0
    }

    /// Moves `position` one cell towards `direction`, wrapping on both axes.
    #[must_use]
    pub fn step(self, position: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        let cell = self.cell_size as i32;
        Position {
            x: wrap_axis(position.x + dx * cell, self.width as i32),
            y: wrap_axis(position.y + dy * cell, self.height as i32),
        }
    }

    /// Converts cell indices to a pixel position.
    #[must_use]
    pub fn position_of_cell(self, column: u32, row: u32) -> Position {
        Position {
            x: (column * self.cell_size) as i32,
            y: (row * self.cell_size) as i32,
        }
    }

    /// Converts a pixel position to `(column, row)` cell indices.
    #[must_use]
    pub fn cell_of(self, position: Position) -> Option<(u32, u32)> {
        if !self.contains(position) {
            return None;
        }
        let cell = self.cell_size as i32;
        Some(((position.x / cell) as u32, (position.y / cell) as u32))
    }

    /// Samples a uniformly random cell.
    pub fn random_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Position {
        let column = rng.gen_range(0..self.columns());
        let row = rng.gen_range(0..self.rows());
        self.position_of_cell(column, row)
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        (0..self.rows()).flat_map(move |row| {
            (0..self.columns()).map(move |column| self.position_of_cell(column, row))
        })
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    value.rem_euclid(upper_bound)
}
