pub mod canvas;
pub mod draw;
pub mod renderer;
pub mod surface;

pub use canvas::{Cell, PixelCanvas};
pub use draw::{clear_canvas, draw_food, draw_snake};
pub use renderer::Renderer;
pub use surface::{Color, Palette, ScoreBoard, ScoreSink, Surface};
