use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::canvas::PixelCanvas;
use super::surface::ScoreBoard;
use crate::game::GameState;
use crate::metrics::GameMetrics;

/// Presents the last painted canvas plus score header and controls footer
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        canvas: &PixelCanvas,
        scores: &ScoreBoard,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Field
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(scores, metrics), chunks[0]);

        // Each grid cell is two columns wide, plus the border on both sides
        let field_width = (canvas.columns().max(0) as u16).saturating_mul(2).saturating_add(2);
        let field_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(field_width),
                Constraint::Fill(1),
            ])
            .split(chunks[1])[1];

        frame.render_widget(self.render_canvas(canvas), field_area);

        // The last frame stays on screen after the game ends
        let footer = if state.is_alive() {
            self.render_controls()
        } else {
            self.render_game_over(state)
        };
        frame.render_widget(footer, chunks[2]);
    }

    fn render_canvas(&self, canvas: &PixelCanvas) -> Paragraph<'static> {
        let mut lines = Vec::with_capacity(canvas.rows().max(0) as usize);

        for row in 0..canvas.rows() {
            let spans: Vec<Span> = (0..canvas.columns())
                .filter_map(|column| canvas.cell(column, row))
                .map(|cell| {
                    let style = Style::default().bg(cell.fill.into());
                    match cell.stroke {
                        Some(stroke) => Span::styled("[]", style.fg(stroke.into())),
                        None => Span::styled("  ", style),
                    }
                })
                .collect();

            lines.push(Line::from(spans));
        }

        let border = canvas.border().map(Color::from).unwrap_or(Color::Reset);

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Plain)
                .border_style(Style::default().fg(border))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, scores: &ScoreBoard, metrics: &GameMetrics) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                scores.displayed.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.best_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.clock(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'static> {
        let reason = state
            .game_over
            .map(|reason| reason.describe())
            .unwrap_or_default();

        let text = vec![Line::from(vec![
            Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" ({reason}) "), Style::default().fg(Color::Gray)),
            Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" restart  ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" quit", Style::default().fg(Color::Gray)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine, GameOver};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw_to_string(state: &GameState, canvas: &PixelCanvas) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let renderer = Renderer::new();
        terminal
            .draw(|frame| {
                renderer.render(frame, state, canvas, &ScoreBoard::new(), &GameMetrics::new())
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_draws_header_and_snake() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 3);
        let mut state = engine.reset();
        let mut canvas = PixelCanvas::new(100, 100);
        engine.tick(&mut state, &mut canvas, &mut ScoreBoard::new());

        let screen = draw_to_string(&state, &canvas);
        assert!(screen.contains("Score:"));
        assert!(screen.contains("[]"));
        assert!(screen.contains("to move"));
    }

    #[test]
    fn test_game_over_footer() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 3);
        let mut state = engine.reset();
        state.game_over = Some(GameOver::Wall);

        let screen = draw_to_string(&state, &PixelCanvas::new(100, 100));
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("hit the wall"));
    }
}
