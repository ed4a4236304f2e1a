use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{BoardConfig, GameConfig};
use crate::food::Food;
use crate::input::{Direction, GameInput};
use crate::snake::{Position, Snake};

/// Direction the snake faces on a fresh start.
pub const START_DIRECTION: Direction = Direction::Right;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Food>,
    pub score: u32,
    pub status: GameStatus,
    config: GameConfig,
    elapsed_secs: f32,
    rng: StdRng,
}

impl GameState {
    /// Creates a state seeded from OS entropy.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Self {
            snake: Snake::new(Position::ORIGIN, START_DIRECTION),
            food: None,
            score: 0,
            status: GameStatus::Playing,
            config,
            elapsed_secs: 0.0,
            rng,
        }
    }

    #[must_use]
    pub fn board(&self) -> BoardConfig {
        self.config.board()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Runs one frame in driver order: turns, movement, eating, food refill.
    ///
    /// While the game is over only a restart signal is honoured.
    pub fn update(&mut self, inputs: &[GameInput], delta_secs: f32) {
        match self.status {
            GameStatus::Playing => {
                for input in inputs {
                    if let GameInput::Direction(direction) = *input {
                        self.set_direction(direction);
                    }
                }

                self.tick(delta_secs);
                self.check_food_collision();
                self.ensure_food_placed();
            }
            GameStatus::GameOver => {
                if inputs.contains(&GameInput::Restart) {
                    self.restart();
                }
            }
        }
    }

    /// Requests a turn; at most one is accepted between two steps.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.status != GameStatus::Playing {
            return;
        }

        self.snake.set_direction(requested);
    }

    /// Accumulates elapsed time and performs one step once the move interval
    /// is exceeded. Surplus time is dropped. Returns whether a step happened.
    pub fn tick(&mut self, delta_secs: f32) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }

        // NaN and negative deltas both clamp to zero.
        self.elapsed_secs += delta_secs.max(0.0);
        if self.elapsed_secs <= self.config.move_interval_secs() {
            return false;
        }

        self.elapsed_secs = 0.0;
        self.snake.step(self.config.board());

        if self.snake.head_overlaps_body() {
            self.status = GameStatus::GameOver;
            info!(
                "game over at {:?}: score {}, length {}",
                self.snake.head(),
                self.score,
                self.snake.body_len()
            );
        }

        true
    }

    /// Eats the food when the head sits on it, growing the body by one.
    pub fn check_food_collision(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }

        let Some(food) = self.food else {
            return;
        };

        if food.position != self.snake.head() {
            return;
        }

        self.score += food.points();
        self.snake.grow();
        self.food = None;
        debug!(
            "food eaten at {:?}: score {}, length {}",
            food.position,
            self.score,
            self.snake.body_len()
        );
    }

    /// Places food on a random cell other than the head when none is present.
    pub fn ensure_food_placed(&mut self) {
        if self.food.is_some() {
            return;
        }

        let food = Food::spawn(&mut self.rng, self.config.board(), self.snake.head());
        debug!("food placed at {:?}", food.position);
        self.food = Some(food);
    }

    /// Resets everything but the board, config and random source.
    pub fn restart(&mut self) {
        self.snake = Snake::new(Position::ORIGIN, START_DIRECTION);
        self.food = None;
        self.score = 0;
        self.elapsed_secs = 0.0;
        if self.status == GameStatus::GameOver {
            info!("restarting");
        }
        self.status = GameStatus::Playing;
    }
}
