use anyhow::{Context, Result};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use tracing::info;

use super::session::{run_loop, Session};
use crate::game::{GameConfig, GameEngine};
use crate::render::Renderer;

/// Play in the terminal with keyboard controls
pub struct HumanMode {
    session: Session,
    renderer: Renderer,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        };

        Self {
            session: Session::new(engine),
            renderer: Renderer::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!("game started");
        let result = self.run_game_loop(&mut terminal).await;

        // Restore the terminal even if the loop failed
        let cleanup = Self::cleanup_terminal(&mut terminal);
        info!(
            score = self.session.state().score,
            best = self.session.metrics().best_score,
            games = self.session.metrics().games_played,
            "game closed"
        );

        result.and(cleanup)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let renderer = &self.renderer;
        run_loop(&mut self.session, EventStream::new(), |session| {
            terminal
                .draw(|frame| {
                    renderer.render(
                        frame,
                        session.state(),
                        session.canvas(),
                        session.scores(),
                        session.metrics(),
                    );
                })
                .context("Failed to draw frame")?;
            Ok(())
        })
        .await
    }

    fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default(), Some(5));
        assert!(mode.session.state().is_alive());
        assert_eq!(mode.session.state().score, 0);
        assert_eq!(mode.session.canvas().columns(), 30);
    }
}
