//! The game loop, independent of any real terminal
//!
//! [`run_loop`] multiplexes an event stream with a one-shot tick deadline.
//! Each tick re-arms the deadline only after it finishes, so a slow tick
//! pushes later ticks back instead of bunching them up. Once a tick reports
//! game over no deadline is armed and the last frame stays as it is.

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEventKind};
use futures::{Stream, StreamExt};
use std::io;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use crate::game::{GameEngine, GameState, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{PixelCanvas, ScoreBoard};

/// Everything one running game owns
pub struct Session {
    engine: GameEngine,
    state: GameState,
    canvas: PixelCanvas,
    scores: ScoreBoard,
    metrics: GameMetrics,
    input_handler: InputHandler,
    should_quit: bool,
}

impl Session {
    pub fn new(mut engine: GameEngine) -> Self {
        let state = engine.reset();
        let mut canvas = PixelCanvas::new(state.field_width, state.field_height);
        engine.paint(&state, &mut canvas);

        Self {
            engine,
            state,
            canvas,
            scores: ScoreBoard::new(),
            metrics: GameMetrics::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply a terminal event and report what it asked for
    pub fn handle_event(&mut self, event: Event) -> KeyAction {
        let Event::Key(key) = event else {
            return KeyAction::None;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        let action = self.input_handler.handle_key_event(key);
        self.apply(action);
        action
    }

    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                if !self.state.is_alive() {
                    return;
                }
                let turn = self.state.change_direction(direction);
                debug!(?direction, ?turn, "direction change");
            }
            KeyAction::Restart => self.restart(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        let was_alive = self.state.is_alive();
        let outcome = self
            .engine
            .tick(&mut self.state, &mut self.canvas, &mut self.scores);

        if was_alive && outcome.is_game_over() {
            self.metrics.on_game_over(self.state.score);
        }
        outcome
    }

    /// Start a new game; a game still in progress counts as played
    pub fn restart(&mut self) {
        if self.state.is_alive() {
            self.metrics.on_game_over(self.state.score);
        }
        info!(
            previous_score = self.state.score,
            best = self.metrics.best_score,
            "restarting game"
        );
        self.state = self.engine.reset();
        self.engine.paint(&self.state, &mut self.canvas);
        self.scores.reset();
        self.metrics.on_game_start();
    }
}

/// Drive the session until quit, end of input, or (optionally) game over
///
/// `present` is called after every tick and every handled event.
pub async fn run_loop<E, P>(session: &mut Session, mut events: E, mut present: P) -> Result<()>
where
    E: Stream<Item = io::Result<Event>> + Unpin,
    P: FnMut(&Session) -> Result<()>,
{
    let interval = session.engine.config().tick_interval();
    let exit_on_game_over = session.engine.config().exit_on_game_over;
    let mut next_tick = session.state.is_alive().then(|| Instant::now() + interval);

    present(session)?;

    loop {
        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        if session.handle_event(event) == KeyAction::Restart {
                            next_tick = Some(Instant::now() + interval);
                        }
                    }
                    Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                    None => break,
                }
            }

            _ = sleep_until(next_tick.unwrap_or_else(Instant::now)), if next_tick.is_some() => {
                next_tick = match session.tick() {
                    TickOutcome::GameOver(_) => None,
                    TickOutcome::Advanced { .. } => Some(Instant::now() + interval),
                };
            }
        }

        present(session)?;

        if session.should_quit || (exit_on_game_over && !session.state.is_alive()) {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, GameOver, Position};
    use crate::render::Color;

    fn session() -> Session {
        Session::new(GameEngine::with_seed(GameConfig::small(), 11))
    }

    #[test]
    fn test_second_turn_in_same_tick_is_ignored() {
        let mut session = session();
        session.apply(KeyAction::Turn(Direction::Up));
        session.apply(KeyAction::Turn(Direction::Left));
        assert_eq!(session.state().snake.direction, Direction::Up);

        session.tick();
        session.apply(KeyAction::Turn(Direction::Left));
        assert_eq!(session.state().snake.direction, Direction::Left);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut session = session();
        session.state.snake.body[0] = Position::new(-10, 50);

        assert_eq!(session.tick(), TickOutcome::GameOver(GameOver::Wall));
        assert_eq!(session.metrics().games_played, 1);

        session.apply(KeyAction::Restart);
        assert!(session.state().is_alive());
        assert_eq!(session.state().snake.head(), Position::new(50, 50));
        assert_eq!(session.scores().displayed, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_mid_game_counts_the_abandoned_game() {
        let mut session = session();
        session.state.food = Position::new(60, 50);
        session.tick();
        assert_eq!(session.state().score, 10);

        session.apply(KeyAction::Restart);

        assert_eq!(session.metrics().best_score, 10);
        assert_eq!(session.metrics().games_played, 1);
        assert_eq!(session.state().score, 0);
    }

    #[test]
    fn test_restart_repaints_canvas() {
        let mut session = session();
        session.apply(KeyAction::Turn(Direction::Down));
        for _ in 0..3 {
            session.tick();
        }
        let old_head = session.state().snake.head();
        assert_eq!(old_head, Position::new(50, 80));

        session.apply(KeyAction::Restart);

        let canvas = session.canvas();
        let new_head = session.state().snake.head();
        assert_eq!(canvas.cell_at(new_head).map(|cell| cell.fill), Some(Color::LightGreen));
        assert_ne!(canvas.cell_at(old_head).map(|cell| cell.fill), Some(Color::LightGreen));
        assert_eq!(canvas.border(), Some(Color::Black));
    }

    #[test]
    fn test_new_session_shows_first_frame() {
        let session = session();
        let head = session.state().snake.head();
        assert_eq!(
            session.canvas().cell_at(head).map(|cell| cell.fill),
            Some(Color::LightGreen)
        );
    }

    #[test]
    fn test_turns_ignored_after_game_over() {
        let mut session = session();
        session.state.game_over = Some(GameOver::Wall);
        session.apply(KeyAction::Turn(Direction::Down));
        assert_eq!(session.state().snake.direction, Direction::Right);
    }
}
