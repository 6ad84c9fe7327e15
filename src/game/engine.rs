use rand::{rngs::StdRng, seq::IteratorRandom, Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{
    action::Direction,
    config::GameConfig,
    state::{GameOver, GameState, Position, Snake},
    GRID_UNIT,
};
use crate::render::{clear_canvas, draw_food, draw_snake, ScoreSink, Surface};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved one step; `ate_food` is set if it grew
    Advanced { ate_food: bool },
    /// The game has ended and no further ticks should be scheduled
    GameOver(GameOver),
}

impl TickOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, TickOutcome::GameOver(_))
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the starting state: snake heading right, first food placed
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(
            self.config.start_position(),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let food = self.create_food(&snake);
        let head = snake.head();
        let mut state = GameState::new(
            snake,
            food.unwrap_or(head),
            self.config.field_width,
            self.config.field_height,
        );

        if food.is_none() {
            state.game_over = Some(GameOver::BoardFull);
        }
        state
    }

    /// Run one tick: termination check, unlock input, draw, advance, draw
    pub fn tick<S, B>(
        &mut self,
        state: &mut GameState,
        surface: &mut S,
        scores: &mut B,
    ) -> TickOutcome
    where
        S: Surface + ?Sized,
        B: ScoreSink + ?Sized,
    {
        if let Some(reason) = state.game_over {
            return TickOutcome::GameOver(reason);
        }

        if let Some(reason) = state.check_game_over() {
            info!(score = state.score, ticks = state.ticks, ?reason, "game over");
            state.game_over = Some(reason);
            return TickOutcome::GameOver(reason);
        }

        state.direction_locked = false;

        let palette = &self.config.palette;
        clear_canvas(surface, palette);
        draw_food(surface, palette, state.food);

        let ate_food = self.advance(state, scores);

        draw_snake(surface, &self.config.palette, &state.snake);
        state.ticks += 1;

        match state.game_over {
            Some(reason) => TickOutcome::GameOver(reason),
            None => TickOutcome::Advanced { ate_food },
        }
    }

    /// Draw the state as it stands, without advancing
    pub fn paint<S: Surface + ?Sized>(&self, state: &GameState, surface: &mut S) {
        let palette = &self.config.palette;
        clear_canvas(surface, palette);
        draw_food(surface, palette, state.food);
        draw_snake(surface, palette, &state.snake);
    }

    /// Move the snake one step, eating and re-placing food when the head lands on it
    pub fn advance<B>(&mut self, state: &mut GameState, scores: &mut B) -> bool
    where
        B: ScoreSink + ?Sized,
    {
        let next_head = state.snake.head().moved_in_direction(state.snake.direction);
        let ate_food = next_head == state.food;

        state.snake.advance(ate_food);

        if ate_food {
            state.score += self.config.score_per_food;
            scores.show_score(state.score);
            debug!(score = state.score, length = state.snake.len(), "food eaten");

            match self.create_food(&state.snake) {
                Some(food) => state.food = food,
                None => {
                    info!(score = state.score, "no free cell left for food");
                    state.game_over = Some(GameOver::BoardFull);
                }
            }
        }

        ate_food
    }

    /// Pick a random free cell for food
    ///
    /// Draws uniformly over the field and retries on collisions with the
    /// snake. After `max_food_attempts` misses it samples from the free
    /// cells directly, so a crowded board still terminates. Returns `None`
    /// only when the snake covers every cell.
    pub fn create_food(&mut self, snake: &Snake) -> Option<Position> {
        let columns = self.config.field_width / GRID_UNIT;
        let rows = self.config.field_height / GRID_UNIT;
        if columns <= 0 || rows <= 0 {
            warn!(columns, rows, "field has no cells");
            return None;
        }

        for _ in 0..self.config.max_food_attempts {
            let pos = Position::new(
                self.rng.gen_range(0..columns) * GRID_UNIT,
                self.rng.gen_range(0..rows) * GRID_UNIT,
            );

            if !snake.contains(pos) {
                return Some(pos);
            }
        }

        debug!(
            attempts = self.config.max_food_attempts,
            "falling back to free-cell sampling"
        );
        (0..rows)
            .flat_map(|row| {
                (0..columns).map(move |column| Position::new(column * GRID_UNIT, row * GRID_UNIT))
            })
            .filter(|pos| !snake.contains(*pos))
            .choose(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{PixelCanvas, ScoreBoard};

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 7)
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        let state = engine.reset();

        assert!(state.is_alive());
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 5);
        assert_eq!(state.snake.head(), Position::new(150, 150));
        assert_eq!(state.snake.tail(), Some(Position::new(110, 150)));
        assert_eq!(state.velocity(), (10, 0));
        assert!(!state.is_occupied_by_snake(state.food));
    }

    #[test]
    fn test_tick_without_food_keeps_length() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Position::new(0, 0);
        let mut canvas = PixelCanvas::new(300, 300);
        let mut scores = ScoreBoard::new();

        let outcome = engine.tick(&mut state, &mut canvas, &mut scores);

        assert_eq!(outcome, TickOutcome::Advanced { ate_food: false });
        assert_eq!(state.snake.len(), 5);
        assert_eq!(state.snake.head(), Position::new(160, 150));
        assert_eq!(state.snake.tail(), Some(Position::new(120, 150)));
        assert_eq!(scores.updates, 0);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Position::new(160, 150);
        let mut canvas = PixelCanvas::new(300, 300);
        let mut scores = ScoreBoard::new();

        let outcome = engine.tick(&mut state, &mut canvas, &mut scores);

        assert_eq!(outcome, TickOutcome::Advanced { ate_food: true });
        assert_eq!(state.score, 10);
        assert_eq!(scores.displayed, 10);
        assert_eq!(state.snake.len(), 6);
        assert_eq!(state.snake.tail(), Some(Position::new(110, 150)));
        assert!(!state.is_occupied_by_snake(state.food));
    }

    #[test]
    fn test_tick_unlocks_direction() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.direction_locked = true;

        engine.tick(&mut state, &mut PixelCanvas::new(300, 300), &mut ScoreBoard::new());
        assert!(!state.direction_locked);
    }

    #[test]
    fn test_wall_stops_ticking() {
        let mut engine = engine();
        let snake = Snake::new(Position::new(0, 150), Direction::Left, 5);
        let mut state = GameState::new(snake, Position::new(200, 200), 300, 300);
        let mut canvas = PixelCanvas::new(300, 300);
        let mut scores = ScoreBoard::new();

        // The step off the field still happens; the next tick notices it.
        assert!(!engine.tick(&mut state, &mut canvas, &mut scores).is_game_over());
        assert_eq!(state.snake.head().x, -10);

        let draws = canvas.draw_calls();
        let outcome = engine.tick(&mut state, &mut canvas, &mut scores);
        assert_eq!(outcome, TickOutcome::GameOver(GameOver::Wall));
        assert_eq!(canvas.draw_calls(), draws);

        let again = engine.tick(&mut state, &mut canvas, &mut scores);
        assert_eq!(again, outcome);
        assert_eq!(state.ticks, 1);
    }

    #[test]
    fn test_food_fallback_on_crowded_board() {
        let config = GameConfig {
            max_food_attempts: 0,
            ..GameConfig::new(30, 10)
        };
        let mut engine = GameEngine::with_seed(config, 1);
        let snake = Snake::new(Position::new(10, 0), Direction::Right, 2);

        assert_eq!(engine.create_food(&snake), Some(Position::new(20, 0)));
    }

    #[test]
    fn test_full_board_ends_game() {
        let config = GameConfig::new(30, 10);
        let mut engine = GameEngine::with_seed(config, 1);
        let snake = Snake::new(Position::new(10, 0), Direction::Right, 2);
        let mut state = GameState::new(snake, Position::new(20, 0), 30, 10);

        let mut canvas = PixelCanvas::new(30, 10);
        let outcome = engine.tick(&mut state, &mut canvas, &mut ScoreBoard::new());

        assert_eq!(outcome, TickOutcome::GameOver(GameOver::BoardFull));
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.score, 10);
    }
}
