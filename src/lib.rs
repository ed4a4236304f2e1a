//! Fixed-timestep grid Snake: a torus-wrapping board, one food item at a
//! time, growth by insertion and self-collision ending the round.
//!
//! The simulation lives in [`game::GameState`]; everything under
//! [`renderer`], [`ui`] and [`terminal_runtime`] is the terminal front-end.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
