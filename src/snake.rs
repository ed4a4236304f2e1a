use std::collections::VecDeque;

use crate::config::BoardConfig;
use crate::input::{Direction, direction_change_is_valid};

/// Grid-aligned position in board units.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Returns the position one cell away in `direction`, without wrapping.
    #[must_use]
    pub fn stepped(self, direction: Direction, cell_size: u16) -> Self {
        let (dx, dy) = direction.delta();
        let cell = i32::from(cell_size);
        Self {
            x: self.x + dx * cell,
            y: self.y + dy * cell,
        }
    }

    /// Returns this position wrapped onto the board on both axes.
    ///
    /// Leaving past the far edge lands on 0; leaving below 0 lands on the last
    /// cell of that axis.
    #[must_use]
    pub fn wrapped(self, board: BoardConfig) -> Self {
        let cell = i32::from(board.cell_size());
        Self {
            x: wrap_axis(self.x, i32::from(board.width()), cell),
            y: wrap_axis(self.y, i32::from(board.height()), cell),
        }
    }
}

fn wrap_axis(value: i32, extent: i32, cell: i32) -> i32 {
    if value >= extent {
        0
    } else if value < 0 {
        extent - cell
    } else {
        value
    }
}

/// The moving head plus its trailing body.
///
/// Body segments are stored trailing-end first: index 0 is the segment that
/// moves next, the back of the deque sits right behind the head.
#[derive(Debug, Clone)]
pub struct Snake {
    head: Position,
    direction: Direction,
    direction_latched: bool,
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a bodiless snake at `start` heading in `direction`.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self {
            head: start,
            direction,
            direction_latched: false,
            body: VecDeque::new(),
        }
    }

    /// Creates a snake with explicit body segments (trailing end first).
    #[must_use]
    pub fn from_parts(head: Position, direction: Direction, body: Vec<Position>) -> Self {
        Self {
            head,
            direction,
            direction_latched: false,
            body: VecDeque::from(body),
        }
    }

    /// Requests a turn for the next step.
    ///
    /// Only the first accepted change per step takes effect. Reversals and
    /// requests for the current direction are ignored without consuming the
    /// latch. Returns whether the direction changed.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.direction_latched
            || requested == self.direction
            || !direction_change_is_valid(self.direction, requested)
        {
            return false;
        }

        self.direction = requested;
        self.direction_latched = true;
        true
    }

    /// Moves the head one cell, wraps it onto the board and drags the body
    /// along behind it. Returns the head position before the move.
    pub fn step(&mut self, board: BoardConfig) -> Position {
        let previous = self.head;
        self.head = previous
            .stepped(self.direction, board.cell_size())
            .wrapped(board);

        // Recycle the trailing segment as the one right behind the head.
        if self.body.pop_front().is_some() {
            self.body.push_back(previous);
        }

        self.direction_latched = false;
        previous
    }

    /// Adds a segment at the trailing end, on the current head cell.
    pub fn grow(&mut self) {
        self.body.push_front(self.head);
    }

    /// Returns true if any body segment sits on the head cell.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        self.body.contains(&self.head)
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns true while a turn has been accepted since the last step.
    #[must_use]
    pub fn direction_latched(&self) -> bool {
        self.direction_latched
    }

    /// Number of body segments, not counting the head.
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Iterates over body segments from the trailing end towards the head.
    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::BoardConfig;
    use crate::input::Direction;

    use super::{Position, Snake};

    fn pos(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    #[test]
    fn wrapping_lands_on_the_opposite_edge() {
        let board = BoardConfig::default();

        assert_eq!(pos(640, 96).wrapped(board), pos(0, 96));
        assert_eq!(pos(-32, 96).wrapped(board), pos(608, 96));
        assert_eq!(pos(64, 480).wrapped(board), pos(64, 0));
        assert_eq!(pos(64, -32).wrapped(board), pos(64, 448));
        assert_eq!(pos(64, 96).wrapped(board), pos(64, 96));
    }

    #[test]
    fn step_never_leaves_the_board() {
        let board = BoardConfig::new(128, 96, 32).unwrap();
        let directions = [
            Direction::Right,
            Direction::Left,
            Direction::Up,
            Direction::Down,
        ];

        for x in (0..128).step_by(32) {
            for y in (0..96).step_by(32) {
                for direction in directions {
                    let mut snake = Snake::new(pos(x, y), direction);
                    snake.step(board);
                    assert!(board.contains(snake.head()), "{:?}", snake.head());
                }
            }
        }
    }

    #[test]
    fn snake_moves_one_cell_per_step() {
        let board = BoardConfig::default();
        let mut snake = Snake::new(pos(0, 0), Direction::Right);

        let previous = snake.step(board);

        assert_eq!(previous, pos(0, 0));
        assert_eq!(snake.head(), pos(32, 0));
        assert_eq!(snake.body_len(), 0);
    }

    #[test]
    fn reversal_is_ignored_and_turn_is_accepted() {
        let mut snake = Snake::new(pos(0, 0), Direction::Right);

        assert!(!snake.set_direction(Direction::Left));
        assert_eq!(snake.direction(), Direction::Right);
        assert!(!snake.direction_latched());

        assert!(snake.set_direction(Direction::Up));
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn only_first_turn_per_step_is_accepted() {
        let board = BoardConfig::default();
        let mut snake = Snake::new(pos(96, 96), Direction::Right);

        assert!(snake.set_direction(Direction::Up));
        assert!(!snake.set_direction(Direction::Left));
        assert_eq!(snake.direction(), Direction::Up);

        snake.step(board);
        assert_eq!(snake.head(), pos(96, 128));

        assert!(snake.set_direction(Direction::Left));
        snake.step(board);
        assert_eq!(snake.head(), pos(64, 128));
    }

    #[test]
    fn same_direction_does_not_consume_the_latch() {
        let mut snake = Snake::new(pos(0, 0), Direction::Right);

        assert!(!snake.set_direction(Direction::Right));
        assert!(snake.set_direction(Direction::Down));
    }

    #[test]
    fn body_follows_the_head() {
        let board = BoardConfig::default();
        let mut snake = Snake::from_parts(
            pos(96, 0),
            Direction::Right,
            vec![pos(32, 0), pos(64, 0)],
        );

        snake.step(board);

        assert_eq!(snake.head(), pos(128, 0));
        let body: Vec<_> = snake.body().copied().collect();
        assert_eq!(body, vec![pos(64, 0), pos(96, 0)]);
    }

    #[test]
    fn grown_segment_trails_from_the_eaten_cell() {
        let board = BoardConfig::default();
        let mut snake = Snake::new(pos(32, 0), Direction::Right);

        snake.grow();
        assert_eq!(snake.body_len(), 1);
        assert!(snake.head_overlaps_body());

        snake.step(board);
        assert_eq!(snake.body_len(), 1);
        assert_eq!(snake.body().copied().collect::<Vec<_>>(), vec![pos(32, 0)]);
        assert!(!snake.head_overlaps_body());
    }
}
