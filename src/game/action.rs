use super::GRID_UNIT;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Per-tick velocity (dx, dy), one grid unit along an axis
    pub fn velocity(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -GRID_UNIT),
            Direction::Down => (0, GRID_UNIT),
            Direction::Left => (-GRID_UNIT, 0),
            Direction::Right => (GRID_UNIT, 0),
        }
    }
}

/// Result of offering a direction change to the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The new direction will be used by the next advance
    Accepted,
    /// A change was already accepted this tick
    Locked,
    /// The requested direction is the reverse of the current one
    Reversal,
}

impl Turn {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Turn::Accepted)
    }
}
