use super::surface::{Color, Surface};
use crate::game::{Position, GRID_UNIT};

/// One grid square of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub fill: Color,
    pub stroke: Option<Color>,
}

/// In-memory drawing surface with one cell per grid square
///
/// Rectangles are snapped to the grid: a fill covers every cell whose origin
/// lies inside the rectangle, and anything outside the canvas is clipped.
/// Stroking the full canvas sets the border color instead of outlining cells.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    border: Option<Color>,
    fill_color: Color,
    stroke_color: Color,
    draw_calls: usize,
}

impl PixelCanvas {
    pub fn new(width: i32, height: i32) -> Self {
        let columns = (width / GRID_UNIT).max(0) as usize;
        let rows = (height / GRID_UNIT).max(0) as usize;
        let blank = Cell {
            fill: Color::Black,
            stroke: None,
        };

        Self {
            width,
            height,
            cells: vec![blank; columns * rows],
            border: None,
            fill_color: Color::Black,
            stroke_color: Color::Black,
            draw_calls: 0,
        }
    }

    pub fn columns(&self) -> i32 {
        self.width / GRID_UNIT
    }

    pub fn rows(&self) -> i32 {
        self.height / GRID_UNIT
    }

    /// The cell at grid column/row, if on the canvas
    pub fn cell(&self, column: i32, row: i32) -> Option<Cell> {
        self.index(column, row).map(|i| self.cells[i])
    }

    /// The cell covering a field position
    pub fn cell_at(&self, pos: Position) -> Option<Cell> {
        self.cell(pos.x.div_euclid(GRID_UNIT), pos.y.div_euclid(GRID_UNIT))
    }

    pub fn border(&self) -> Option<Color> {
        self.border
    }

    /// Number of fill/stroke calls since creation
    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    fn index(&self, column: i32, row: i32) -> Option<usize> {
        if column < 0 || row < 0 || column >= self.columns() || row >= self.rows() {
            return None;
        }
        Some((row * self.columns() + column) as usize)
    }

    fn is_full_canvas(&self, x: i32, y: i32, w: i32, h: i32) -> bool {
        x <= 0 && y <= 0 && x + w >= self.width && y + h >= self.height
    }

    /// Grid cells whose origin lies inside the rectangle, clipped to the canvas
    fn covered(&self, x: i32, y: i32, w: i32, h: i32) -> Vec<usize> {
        let first_column = x.div_euclid(GRID_UNIT) + i32::from(x.rem_euclid(GRID_UNIT) != 0);
        let first_row = y.div_euclid(GRID_UNIT) + i32::from(y.rem_euclid(GRID_UNIT) != 0);
        let end_column = (x + w + GRID_UNIT - 1).div_euclid(GRID_UNIT);
        let end_row = (y + h + GRID_UNIT - 1).div_euclid(GRID_UNIT);

        (first_row..end_row)
            .flat_map(|row| (first_column..end_column).map(move |column| (column, row)))
            .filter_map(|(column, row)| self.index(column, row))
            .collect()
    }
}

impl Surface for PixelCanvas {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.draw_calls += 1;
        let fill = self.fill_color;
        for i in self.covered(x, y, w, h) {
            self.cells[i] = Cell { fill, stroke: None };
        }
    }

    fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.draw_calls += 1;
        let stroke = self.stroke_color;
        if self.is_full_canvas(x, y, w, h) {
            self.border = Some(stroke);
            return;
        }
        for i in self.covered(x, y, w, h) {
            self.cells[i].stroke = Some(stroke);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_fill_and_border() {
        let mut canvas = PixelCanvas::new(100, 50);
        canvas.set_fill_color(Color::White);
        canvas.set_stroke_color(Color::Black);
        canvas.fill_rect(0, 0, 100, 50);
        canvas.stroke_rect(0, 0, 100, 50);

        assert_eq!(canvas.columns(), 10);
        assert_eq!(canvas.rows(), 5);
        assert_eq!(canvas.border(), Some(Color::Black));
        assert_eq!(
            canvas.cell(9, 4),
            Some(Cell {
                fill: Color::White,
                stroke: None
            })
        );
        assert_eq!(canvas.draw_calls(), 2);
    }

    #[test]
    fn test_single_square() {
        let mut canvas = PixelCanvas::new(100, 100);
        canvas.set_fill_color(Color::Red);
        canvas.set_stroke_color(Color::DarkRed);
        canvas.fill_rect(30, 40, GRID_UNIT, GRID_UNIT);
        canvas.stroke_rect(30, 40, GRID_UNIT, GRID_UNIT);

        let cell = canvas.cell_at(Position::new(30, 40)).unwrap();
        assert_eq!(cell.fill, Color::Red);
        assert_eq!(cell.stroke, Some(Color::DarkRed));
        assert_eq!(canvas.cell(2, 4).unwrap().fill, Color::Black);
        assert_eq!(canvas.border(), None);
    }

    #[test]
    fn test_off_canvas_drawing_is_clipped() {
        let mut canvas = PixelCanvas::new(100, 100);
        canvas.set_fill_color(Color::LightGreen);
        canvas.fill_rect(-10, 0, GRID_UNIT, GRID_UNIT);
        canvas.fill_rect(100, 0, GRID_UNIT, GRID_UNIT);

        assert_eq!(canvas.cell_at(Position::new(-10, 0)), None);
        assert_eq!(canvas.cell(0, 0).unwrap().fill, Color::Black);
        assert_eq!(canvas.cell(9, 0).unwrap().fill, Color::Black);
    }
}
