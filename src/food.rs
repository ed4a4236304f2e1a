use rand::Rng;

use crate::config::{BoardConfig, POINTS_PER_FOOD};
use crate::snake::Position;

/// Food item currently available on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        POINTS_PER_FOOD
    }

    /// Spawns food on a random cell other than `excluded`.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, board: BoardConfig, excluded: Position) -> Self {
        Self::new(spawn_position(rng, board, excluded))
    }
}

/// Samples uniformly random grid cells until one differs from `excluded`.
///
/// Boards always hold at least two cells, so this terminates with
/// probability one.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    board: BoardConfig,
    excluded: Position,
) -> Position {
    let cell = i32::from(board.cell_size());
    let columns = i32::from(board.columns());
    let rows = i32::from(board.rows());

    loop {
        let candidate = Position {
            x: rng.gen_range(0..columns) * cell,
            y: rng.gen_range(0..rows) * cell,
        };

        if candidate != excluded {
            return candidate;
        }
    }
}
