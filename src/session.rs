use tracing::info;

use crate::error::GameError;
use crate::game::{GameState, TickOutcome};
use crate::grid::Grid;
use crate::input::GameInput;
use crate::score::ScoreSink;

/// Result of one driver step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Step {
    pub outcome: TickOutcome,
    /// Quit was requested; the driver exits after drawing this step.
    pub quit: bool,
}

/// Sequence of games played in one program run.
///
/// Owns the current [`GameState`] and dispatches the inputs drained each
/// tick: directions go to the snake, `NewGame` swaps in a fresh state and
/// `Quit` is reported back once the tick has run.
#[derive(Debug)]
pub struct Session {
    grid: Grid,
    base_seed: Option<u64>,
    games_started: u64,
    current_seed: Option<u64>,
    state: GameState,
}

impl Session {
    /// Starts the first game. With a base seed, game `n` uses
    /// `base_seed + n` so restarts differ but replay identically.
    pub fn new(grid: &Grid, base_seed: Option<u64>) -> Result<Self, GameError> {
        let (state, current_seed) = start_game(grid, base_seed, 0)?;

        Ok(Self {
            grid: *grid,
            base_seed,
            games_started: 1,
            current_seed,
            state,
        })
    }

    /// Applies this tick's inputs in arrival order, then advances the game.
    pub fn step<I, S>(&mut self, inputs: I, scores: &mut S) -> Result<Step, GameError>
    where
        I: IntoIterator<Item = GameInput>,
        S: ScoreSink + ?Sized,
    {
        let mut quit = false;

        for input in inputs {
            match input {
                GameInput::Quit => quit = true,
                GameInput::NewGame => self.restart()?,
                other => self.state.apply_input(other),
            }
        }

        let outcome = self.state.tick(scores)?;
        if quit {
            info!(ticks = self.state.tick_count, "quit requested");
        }

        Ok(Step { outcome, quit })
    }

    /// Discards the current game without recording a score.
    pub fn restart(&mut self) -> Result<(), GameError> {
        let (state, seed) = start_game(&self.grid, self.base_seed, self.games_started)?;
        self.state = state;
        self.current_seed = seed;
        self.games_started += 1;
        info!(games_started = self.games_started, "new game requested");
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn games_started(&self) -> u64 {
        self.games_started
    }

    /// Seed of the running game, when seeding is enabled.
    #[must_use]
    pub fn current_seed(&self) -> Option<u64> {
        self.current_seed
    }
}

fn start_game(
    grid: &Grid,
    base_seed: Option<u64>,
    index: u64,
) -> Result<(GameState, Option<u64>), GameError> {
    match base_seed {
        Some(base) => {
            let seed = base.wrapping_add(index);
            Ok((GameState::new_with_seed(grid, seed)?, Some(seed)))
        }
        None => Ok((GameState::new(grid)?, None)),
    }
}
