//! The drawing and score interfaces the game loop talks to
//!
//! The loop never touches the terminal directly. Each tick it paints onto a
//! [`Surface`] and reports score changes to a [`ScoreSink`]; the terminal
//! front end and the tests each supply their own implementations.

use serde::{Deserialize, Serialize};

/// Colors used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Black,
    LightGreen,
    DarkGreen,
    Red,
    DarkRed,
}

impl From<Color> for ratatui::style::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::White => ratatui::style::Color::White,
            Color::Black => ratatui::style::Color::Black,
            Color::LightGreen => ratatui::style::Color::LightGreen,
            Color::DarkGreen => ratatui::style::Color::Green,
            Color::Red => ratatui::style::Color::LightRed,
            Color::DarkRed => ratatui::style::Color::Red,
        }
    }
}

/// Fill and border colors for each thing drawn on the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub border: Color,
    pub snake: Color,
    pub snake_border: Color,
    pub food: Color,
    pub food_border: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::White,
            border: Color::Black,
            snake: Color::LightGreen,
            snake_border: Color::DarkGreen,
            food: Color::Red,
            food_border: Color::DarkRed,
        }
    }
}

/// A 2D drawing context addressed in field units
pub trait Surface {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32);
    fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32);
}

/// Receives the score every time it changes
pub trait ScoreSink {
    fn show_score(&mut self, score: u32);
}

/// Score display state read by the terminal header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub displayed: u32,
    pub updates: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.displayed = 0;
    }
}

impl ScoreSink for ScoreBoard {
    fn show_score(&mut self, score: u32) {
        self.displayed = score;
        self.updates += 1;
    }
}
