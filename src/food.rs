use std::collections::HashSet;

use rand::Rng;
use rand::seq::IteratorRandom;

use crate::error::GameError;
use crate::grid::{Grid, Position};

/// Random draws per grid cell before placement falls back to a scan.
pub const PLACEMENT_ATTEMPTS_PER_CELL: usize = 4;

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    position: Position,
}

impl Food {
    /// Creates food at a fixed `position`.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food in a cell that is not in `occupied`.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        grid: &Grid,
        occupied: &HashSet<Position>,
    ) -> Result<Self, GameError> {
        spawn_position(rng, grid, occupied).map(Self::new)
    }

    /// Moves the food to a random cell that is not in `occupied`.
    ///
    /// On error the previous position is kept.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: &Grid,
        occupied: &HashSet<Position>,
    ) -> Result<(), GameError> {
        self.position = spawn_position(rng, grid, occupied)?;
        Ok(())
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }
}

/// Picks a uniformly random free cell.
///
/// Rejection sampling is bounded; once the budget is spent the free cells
/// are enumerated and one of them is chosen, so a nearly full grid still
/// finishes in linear time.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    occupied: &HashSet<Position>,
) -> Result<Position, GameError> {
    let total_cells = grid.total_cells();

    if occupied.len() < total_cells {
        for _ in 0..total_cells * PLACEMENT_ATTEMPTS_PER_CELL {
            let candidate = grid.random_cell(rng);
            if !occupied.contains(&candidate) {
                return Ok(candidate);
            }
        }
    }

    grid.cells()
        .filter(|cell| !occupied.contains(cell))
        .choose(rng)
        .ok_or(GameError::GridExhausted {
            width: grid.columns(),
            height: grid.rows(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::error::GameError;
    use crate::grid::{Grid, Position};

    use super::{spawn_position, Food};

    #[test]
    fn food_spawn_never_overlaps_occupied_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::new_unchecked(160, 120, 20);
        let occupied: HashSet<_> = [
            Position::new(0, 0),
            Position::new(20, 0),
            Position::new(40, 0),
        ]
        .into_iter()
        .collect();

        for _ in 0..100 {
            let position = spawn_position(&mut rng, &grid, &occupied)
                .expect("grid has free cells");
            assert!(!occupied.contains(&position));
            assert!(grid.contains(position));
        }
    }

    #[test]
    fn relocate_finds_the_single_free_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = Grid::new_unchecked(60, 60, 20);
        let free = Position::new(40, 20);
        let occupied: HashSet<_> = grid.cells().filter(|cell| *cell != free).collect();
        let mut food = Food::new(Position::new(0, 0));

        for _ in 0..20 {
            food.relocate(&mut rng, &grid, &occupied)
                .expect("one cell is free");
            assert_eq!(food.position(), free);
        }
    }

    #[test]
    fn full_grid_reports_exhaustion() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = Grid::new_unchecked(40, 40, 20);
        let occupied: HashSet<_> = grid.cells().collect();
        let mut food = Food::new(Position::new(20, 20));

        let result = food.relocate(&mut rng, &grid, &occupied);

        assert_eq!(
            result,
            Err(GameError::GridExhausted {
                width: 2,
                height: 2
            })
        );
        assert_eq!(food.position(), Position::new(20, 20));
    }

    #[test]
    fn empty_grid_reaches_every_cell() {
        let mut rng = StdRng::seed_from_u64(21);
        let grid = Grid::new_unchecked(40, 40, 20);
        let mut seen = HashSet::new();

        for _ in 0..200 {
            seen.insert(
                spawn_position(&mut rng, &grid, &HashSet::new()).expect("grid is empty"),
            );
        }

        assert_eq!(seen.len(), 4);
    }
}
