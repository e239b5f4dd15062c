use std::time::SystemTime;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::error::GameError;
use crate::food::Food;
use crate::grid::Grid;
use crate::input::{Direction, GameInput};
use crate::score::ScoreSink;
use crate::snake::Snake;

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The snake moved onto an empty cell.
    Moved,
    /// The snake reached the food and will grow on the next move.
    Ate,
    /// The snake ran into itself and was reset.
    Collided { final_length: usize },
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub tick_count: u64,
    /// Length reached in the most recent lost game, if any.
    pub last_score: Option<usize>,
    grid: Grid,
    rng: StdRng,
}

impl GameState {
    /// Creates a state seeded from OS entropy.
    pub fn new(grid: &Grid) -> Result<Self, GameError> {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible games.
    pub fn new_with_seed(grid: &Grid, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: &Grid, mut rng: StdRng) -> Result<Self, GameError> {
        let snake = Snake::new(grid.center(), Direction::Right);
        let food = Food::spawn(&mut rng, grid, &snake.occupied_cells())?;

        Ok(Self {
            snake,
            food,
            tick_count: 0,
            last_score: None,
            grid: *grid,
            rng,
        })
    }

    /// Applies one external input event. Commands that concern the driver
    /// (quit, new game) are ignored here.
    pub fn apply_input(&mut self, input: GameInput) {
        if let GameInput::Direction(direction) = input {
            self.snake.request_direction(direction);
        }
    }

    /// Advances the simulation by one tick.
    ///
    /// Order: move, then food, then self-collision. On collision the final
    /// length goes to `scores`; a failing sink is logged and otherwise
    /// ignored.
    pub fn tick<S: ScoreSink + ?Sized>(
        &mut self,
        scores: &mut S,
    ) -> Result<TickOutcome, GameError> {
        self.tick_count += 1;
        self.snake.move_forward(&self.grid);

        if self.snake.head() == self.food.position() {
            self.snake.grow();
            self.relocate_food()?;
            return Ok(TickOutcome::Ate);
        }

        if self.snake.is_self_colliding() {
            let final_length = self.snake.reset(&mut self.rng);
            self.last_score = Some(final_length);
            info!(final_length, tick = self.tick_count, "game over");

            if let Err(error) = scores.record(final_length, SystemTime::now()) {
                warn!(%error, final_length, "failed to write score");
            }

            self.relocate_food()?;
            return Ok(TickOutcome::Collided { final_length });
        }

        Ok(TickOutcome::Moved)
    }

    /// Returns the grid this game is played on.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn relocate_food(&mut self) -> Result<(), GameError> {
        self.food
            .relocate(&mut self.rng, &self.grid, &self.snake.occupied_cells())?;
        debug!(position = ?self.food.position(), "food relocated");
        Ok(())
    }
}
