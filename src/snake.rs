use std::collections::{HashSet, VecDeque};

use rand::Rng;

use crate::grid::{Grid, Position};
use crate::input::{Direction, direction_change_is_valid};

/// Mutable snake state and movement buffering behavior.
///
/// Growth is lazy: [`Snake::grow`] raises the target length and the next
/// [`Snake::move_forward`] keeps the tail instead of dropping it.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    origin: Position,
    direction: Direction,
    pending_direction: Option<Direction>,
    target_length: usize,
    last_vacated: Option<Position>,
}

impl Snake {
    /// Creates a one-cell snake at `origin` heading towards `direction`.
    ///
    /// `origin` is also where the snake respawns after [`Snake::reset`].
    #[must_use]
    pub fn new(origin: Position, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([origin]),
            origin,
            direction,
            pending_direction: None,
            target_length: 1,
            last_vacated: None,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// The target length matches the segment count, so the snake keeps its
    /// size while moving. Overlapping segments are allowed.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");
        let origin = segments[0];
        let target_length = segments.len();

        Self {
            body: VecDeque::from(segments),
            origin,
            direction,
            pending_direction: None,
            target_length,
            last_vacated: None,
        }
    }

    /// Buffers `direction` for the next move unless it reverses the
    /// committed direction. A later valid request replaces an earlier one.
    pub fn request_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.direction, direction) {
            self.pending_direction = Some(direction);
        }
    }

    /// Applies one movement step, wrapping around the grid edges.
    pub fn move_forward(&mut self, grid: &Grid) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let next_head = grid.step(self.head(), self.direction);
        self.body.push_front(next_head);

        self.last_vacated = if self.body.len() > self.target_length {
            self.body.pop_back()
        } else {
            None
        };
    }

    /// Raises the target length by one; realized on the next move.
    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        // The body is never empty: constructors and reset keep one segment.
        self.body[0]
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn is_self_colliding(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Respawns the snake as a single cell at its origin facing a random
    /// direction. Returns the length it had before the reset.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let previous_length = self.body.len();

        self.direction = Direction::random(rng);
        self.pending_direction = None;
        self.body.clear();
        self.body.push_front(self.origin);
        self.last_vacated = None;
        self.target_length = 1;

        previous_length
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns the set of occupied cells, for food placement.
    #[must_use]
    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Returns the committed movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Cell the tail left on the most recent move, if the tail moved.
    #[must_use]
    pub fn last_vacated(&self) -> Option<Position> {
        self.last_vacated
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::grid::{Grid, Position};
    use crate::input::Direction;

    use super::Snake;

    fn grid() -> Grid {
        Grid::new_unchecked(640, 480, 20)
    }

    #[test]
    fn snake_moves_one_cell_per_tick() {
        let mut snake = Snake::new(Position::new(320, 240), Direction::Right);

        snake.move_forward(&grid());

        assert_eq!(snake.head(), Position::new(340, 240));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.last_vacated(), Some(Position::new(320, 240)));
    }

    #[test]
    fn snake_growth_keeps_previous_tail() {
        let mut snake = Snake::new(Position::new(320, 240), Direction::Right);
        snake.move_forward(&grid());

        snake.grow();
        snake.move_forward(&grid());

        let body: Vec<_> = snake.segments().copied().collect();
        assert_eq!(
            body,
            vec![Position::new(360, 240), Position::new(340, 240)]
        );
        assert_eq!(snake.last_vacated(), None);
    }

    #[test]
    fn repeated_growth_retains_tail_for_each_increment() {
        let mut snake = Snake::new(Position::new(0, 0), Direction::Right);
        snake.grow();
        snake.grow();
        snake.grow();

        for expected in [2, 3, 4, 4, 4] {
            snake.move_forward(&grid());
            assert_eq!(snake.len(), expected);
        }
    }

    #[test]
    fn single_grow_adds_exactly_one_segment() {
        let mut plain = Snake::new(Position::new(100, 100), Direction::Down);
        let mut fed = plain.clone();

        fed.grow();
        plain.move_forward(&grid());
        fed.move_forward(&grid());

        assert_eq!(fed.len(), plain.len() + 1);
    }

    #[test]
    fn reverse_request_is_dropped() {
        let mut snake = Snake::new(Position::new(100, 100), Direction::Up);

        snake.request_direction(Direction::Down);
        assert_eq!(snake.pending_direction(), None);

        snake.move_forward(&grid());
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.head(), Position::new(100, 80));
    }

    #[test]
    fn every_request_commits_unless_reversing() {
        for committed in Direction::ALL {
            for requested in Direction::ALL {
                let mut snake = Snake::new(Position::new(100, 100), committed);

                snake.request_direction(requested);
                snake.move_forward(&grid());

                let expected = if requested == committed.opposite() {
                    committed
                } else {
                    requested
                };
                assert_eq!(snake.direction(), expected);
            }
        }
    }

    #[test]
    fn requests_are_checked_against_committed_direction() {
        // Up then Left in one tick: Left reverses the committed Right and
        // is dropped even though it would be a legal turn from Up.
        let mut snake = Snake::new(Position::new(100, 100), Direction::Right);

        snake.request_direction(Direction::Up);
        snake.request_direction(Direction::Left);
        snake.move_forward(&grid());

        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn last_valid_request_in_a_tick_wins() {
        // Up then Down in one tick: both are legal against Right, so the
        // snake ends up heading Down without ever moving Up.
        let mut snake = Snake::new(Position::new(100, 100), Direction::Right);

        snake.request_direction(Direction::Up);
        snake.request_direction(Direction::Down);
        snake.move_forward(&grid());

        assert_eq!(snake.direction(), Direction::Down);
        assert_eq!(snake.head(), Position::new(100, 120));
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn overlapping_body_is_self_colliding() {
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(20, 0),
                Position::new(20, 20),
                Position::new(0, 20),
                Position::new(0, 0),
            ],
            Direction::Up,
        );

        assert!(snake.is_self_colliding());
    }

    #[test]
    fn distinct_body_is_not_self_colliding() {
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(20, 0),
                Position::new(20, 20),
                Position::new(0, 20),
            ],
            Direction::Up,
        );

        assert!(!snake.is_self_colliding());
    }

    #[test]
    fn turning_into_own_body_collides_after_move() {
        let mut snake = Snake::from_segments(
            vec![
                Position::new(40, 40),
                Position::new(20, 40),
                Position::new(20, 60),
                Position::new(40, 60),
                Position::new(60, 60),
            ],
            Direction::Right,
        );

        snake.request_direction(Direction::Down);
        snake.move_forward(&grid());

        assert!(snake.is_self_colliding());
    }

    #[test]
    fn reset_returns_previous_length_and_respawns() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut snake = Snake::from_segments(
            vec![
                Position::new(100, 100),
                Position::new(80, 100),
                Position::new(100, 100),
            ],
            Direction::Left,
        );
        snake.request_direction(Direction::Up);

        let length = snake.reset(&mut rng);

        assert_eq!(length, 3);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(100, 100));
        assert_eq!(snake.target_length(), 1);
        assert_eq!(snake.pending_direction(), None);
        assert_eq!(snake.last_vacated(), None);
        assert!(!snake.is_self_colliding());
    }

    #[test]
    #[should_panic(expected = "snake needs at least one segment")]
    fn empty_segments_panic() {
        let _ = Snake::from_segments(Vec::new(), Direction::Right);
    }

    #[test]
    fn reset_direction_is_random() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut snake = Snake::new(Position::new(0, 0), Direction::Right);
        let mut seen = Vec::new();

        for _ in 0..200 {
            snake.reset(&mut rng);
            if !seen.contains(&snake.direction()) {
                seen.push(snake.direction());
            }
        }

        assert_eq!(seen.len(), 4);
    }
}
