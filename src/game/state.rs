use super::action::{Direction, Turn};
use super::GRID_UNIT;

/// Segments at indices below this cannot meet the head on a unit grid
pub const SELF_COLLISION_START: usize = 4;

/// A grid-aligned position on the playing field, in field units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one tick in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.velocity();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a snake whose segments trail behind `head`, opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.velocity();
        let body = std::iter::successors(Some(head), |segment| Some(segment.moved_by(-dx, -dy)))
            .take(length.max(1))
            .collect();

        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Option<Position> {
        self.body.last().copied()
    }

    /// Push a new head one step along `direction`, dropping the tail unless growing
    pub fn advance(&mut self, grow: bool) -> Position {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
        new_head
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// True if the head sits on any segment at or past `SELF_COLLISION_START`
    pub fn head_hits_body(&self) -> bool {
        let head = self.head();
        self.body
            .iter()
            .skip(SELF_COLLISION_START)
            .any(|segment| *segment == head)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a snake built with `Snake::new`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a game stopped ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOver {
    /// The head left the playing field
    Wall,
    /// The head ran into the snake's own body
    SelfCollision,
    /// No free cell was left for new food
    BoardFull,
}

impl GameOver {
    pub fn describe(&self) -> &'static str {
        match self {
            GameOver::Wall => "hit the wall",
            GameOver::SelfCollision => "ran into itself",
            GameOver::BoardFull => "filled the board",
        }
    }
}

/// Complete game state, owned by the game loop
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub field_width: i32,
    pub field_height: i32,
    pub score: u32,
    pub ticks: u32,
    /// Set once a direction change is accepted, cleared at the start of each tick
    pub direction_locked: bool,
    pub game_over: Option<GameOver>,
}

impl GameState {
    pub fn new(snake: Snake, food: Position, field_width: i32, field_height: i32) -> Self {
        Self {
            snake,
            food,
            field_width,
            field_height,
            score: 0,
            ticks: 0,
            direction_locked: false,
            game_over: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.game_over.is_none()
    }

    /// Current velocity (dx, dy) per tick
    pub fn velocity(&self) -> (i32, i32) {
        self.snake.direction.velocity()
    }

    /// Check if a grid square at `pos` lies fully inside the field
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x <= self.field_width - GRID_UNIT
            && pos.y >= 0
            && pos.y <= self.field_height - GRID_UNIT
    }

    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(pos)
    }

    /// Termination test run at the start of every tick
    pub fn check_game_over(&self) -> Option<GameOver> {
        if self.snake.head_hits_body() {
            return Some(GameOver::SelfCollision);
        }

        if !self.is_in_bounds(self.snake.head()) {
            return Some(GameOver::Wall);
        }

        None
    }

    /// Offer a new direction; at most one change is accepted per tick
    pub fn change_direction(&mut self, direction: Direction) -> Turn {
        if self.direction_locked {
            return Turn::Locked;
        }

        if self.snake.direction.is_opposite(direction) {
            return Turn::Reversal;
        }

        self.snake.direction = direction;
        self.direction_locked = true;
        Turn::Accepted
    }
}
