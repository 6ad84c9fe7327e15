use super::surface::{Palette, Surface};
use crate::game::{Position, Snake, GRID_UNIT};

/// Paint the background and outline the whole surface
pub fn clear_canvas<S: Surface + ?Sized>(surface: &mut S, palette: &Palette) {
    let (width, height) = (surface.width(), surface.height());
    surface.set_fill_color(palette.background);
    surface.set_stroke_color(palette.border);
    surface.fill_rect(0, 0, width, height);
    surface.stroke_rect(0, 0, width, height);
}

pub fn draw_food<S: Surface + ?Sized>(surface: &mut S, palette: &Palette, food: Position) {
    surface.set_fill_color(palette.food);
    surface.set_stroke_color(palette.food_border);
    draw_square(surface, food);
}

pub fn draw_snake<S: Surface + ?Sized>(surface: &mut S, palette: &Palette, snake: &Snake) {
    surface.set_fill_color(palette.snake);
    surface.set_stroke_color(palette.snake_border);
    for segment in &snake.body {
        draw_square(surface, *segment);
    }
}

fn draw_square<S: Surface + ?Sized>(surface: &mut S, pos: Position) {
    surface.fill_rect(pos.x, pos.y, GRID_UNIT, GRID_UNIT);
    surface.stroke_rect(pos.x, pos.y, GRID_UNIT, GRID_UNIT);
}
