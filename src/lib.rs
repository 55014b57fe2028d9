//! Tick-driven Snake on a fixed grid.
//!
//! [`game::GameState`] is the engine: a pure state machine advanced by
//! `tick` and steered by `set_direction`. Everything else in the crate is
//! host plumbing around it (timer, key mapping, settings, terminal drawing).

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ticker;
