//! Core game logic module for Snake
//!
//! Everything here runs without a terminal. The engine draws through the
//! [`Surface`](crate::render::Surface) trait and reports score through
//! [`ScoreSink`](crate::render::ScoreSink), so tests can drive whole ticks
//! headlessly.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

/// Side length of one snake segment or food square, in field units
pub const GRID_UNIT: i32 = 10;

// Re-export commonly used types
pub use action::{Direction, Turn};
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome};
pub use state::{GameOver, GameState, Position, Snake};
