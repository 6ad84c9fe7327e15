use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::state::Position;
use super::GRID_UNIT;
use crate::render::Palette;

/// Largest accepted field width or height, in field units
pub const MAX_FIELD_SIZE: i32 = 10_000;

/// Configuration for the game
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playing field in field units (a multiple of the grid unit)
    pub field_width: i32,
    /// Height of the playing field in field units
    pub field_height: i32,
    /// Delay between the end of one tick and the start of the next
    pub tick_ms: u64,
    /// Points awarded per food eaten
    pub score_per_food: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Head of the initial snake
    pub start_x: i32,
    pub start_y: i32,
    /// Random draws tried before sampling food from the free cells directly
    pub max_food_attempts: u32,
    pub palette: Palette,
    /// Leave the loop as soon as the game ends instead of showing the last frame
    pub exit_on_game_over: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 300,
            field_height: 300,
            tick_ms: 80,
            score_per_food: 10,
            initial_snake_length: 5,
            start_x: 150,
            start_y: 150,
            max_food_attempts: 64,
            palette: Palette::default(),
            exit_on_game_over: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom field size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            field_width: width,
            field_height: height,
            ..Default::default()
        }
    }

    /// Create a small field for testing, with the snake kept inside it
    pub fn small() -> Self {
        Self {
            start_x: 50,
            start_y: 50,
            ..Self::new(100, 100)
        }
    }

    /// Load a JSON config file; missing keys fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn start_position(&self) -> Position {
        Position::new(self.start_x, self.start_y)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.field_width), ("height", self.field_height)] {
            if value <= 0 || value % GRID_UNIT != 0 {
                bail!("field {name} must be a positive multiple of {GRID_UNIT}, got {value}");
            }
            if value > MAX_FIELD_SIZE {
                bail!("field {name} must be at most {MAX_FIELD_SIZE}, got {value}");
            }
        }

        if self.tick_ms == 0 {
            bail!("tick_ms must be greater than zero");
        }

        if self.initial_snake_length == 0 {
            bail!("initial_snake_length must be at least 1");
        }

        if self.start_x % GRID_UNIT != 0 || self.start_y % GRID_UNIT != 0 {
            bail!(
                "start position ({}, {}) is not aligned to the grid",
                self.start_x,
                self.start_y
            );
        }

        let cells = (self.field_width / GRID_UNIT) * (self.field_height / GRID_UNIT);
        let length = i32::try_from(self.initial_snake_length).unwrap_or(i32::MAX);
        if length >= cells {
            bail!("initial snake leaves no room for food");
        }

        // The snake trails to the left of its head when it starts moving right.
        let tail_x = self.start_x.checked_sub((length - 1) * GRID_UNIT);
        if tail_x.map_or(true, |x| x < 0)
            || self.start_x > self.field_width - GRID_UNIT
            || self.start_y < 0
            || self.start_y > self.field_height - GRID_UNIT
        {
            bail!("initial snake does not fit inside the field");
        }

        Ok(())
    }
}
