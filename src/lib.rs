//! tick_snake - a fixed-tick Snake game for the terminal
//!
//! - `game`: state, engine and config, free of any I/O
//! - `render`: the drawing surface and score sink traits, an in-memory
//!   canvas, and the ratatui presenter
//! - `input`: key to action mapping
//! - `modes`: the async game loop and the terminal front end

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
