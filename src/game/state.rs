use std::collections::{HashSet, VecDeque};

use super::direction::Direction;

/// A position on the game grid
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

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front. Never empty.
    body: VecDeque<Position>,
    /// Current direction of movement
    direction: Direction,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Position, direction: Direction) -> Self {
        Self::from_segments(head, &[], direction)
    }

    /// Create a snake from its head and the segments trailing it, head-adjacent first
    pub fn from_segments(head: Position, tail: &[Position], direction: Direction) -> Self {
        let mut body = VecDeque::with_capacity(tail.len() + 1);
        body.push_back(head);
        body.extend(tail.iter().copied());
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterate over all segments, head first
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Check if position is covered by any segment, head and tail included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Prepend a new head, dropping the tail unless the snake grows this tick
    pub(crate) fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

impl std::fmt::Display for CollisionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollisionType::Wall => write!(f, "wall"),
            CollisionType::SelfCollision => write!(f, "self"),
        }
    }
}

/// Lifecycle of a single game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Paused,
    /// Terminal until a full reset
    GameOver,
}

/// Complete state of one game session
///
/// The model carries no behavior beyond queries. Tick-time mutation lives in
/// [`SimulationEngine`](super::SimulationEngine) and status transitions in
/// [`GameController`](crate::controller::GameController).
#[derive(Debug, Clone, PartialEq)]
pub struct GridModel {
    pub(crate) grid_size: usize,
    pub(crate) snake: Snake,
    pub(crate) food: Option<Position>,
    pub(crate) score: u32,
    pub(crate) steps: u32,
    pub(crate) status: GameStatus,
}

impl GridModel {
    /// Create a running model with a zero score
    pub fn new(grid_size: usize, snake: Snake, food: Option<Position>) -> Self {
        Self {
            grid_size,
            snake,
            food,
            score: 0,
            steps: 0,
            status: GameStatus::Running,
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of completed ticks in this session
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = i32::try_from(self.grid_size).unwrap_or(i32::MAX);
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Every cell currently covered by the snake
    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.snake.segments().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::from_segments(
            Position::new(5, 5),
            &[Position::new(4, 5), Position::new(3, 5)],
            Direction::Right,
        );
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn test_single_segment_head_is_tail() {
        let snake = Snake::new(Position::new(10, 10), Direction::Right);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), snake.tail());
        assert!(!snake.is_empty());
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::from_segments(
            Position::new(5, 5),
            &[Position::new(4, 5)],
            Direction::Right,
        );

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(5, 5));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Position::new(5, 5));
    }

    #[test]
    fn test_occupancy() {
        let snake = Snake::from_segments(
            Position::new(5, 5),
            &[Position::new(4, 5), Position::new(3, 5)],
            Direction::Right,
        );
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(10, 10)));

        let model = GridModel::new(20, snake, None);
        let cells = model.occupied_cells();
        assert_eq!(cells.len(), 3);
        assert!(cells.contains(&Position::new(4, 5)));
    }

    #[test]
    fn test_bounds_checking() {
        let model = GridModel::new(
            20,
            Snake::new(Position::new(5, 5), Direction::Right),
            Some(Position::new(10, 10)),
        );

        assert!(model.is_in_bounds(Position::new(0, 0)));
        assert!(model.is_in_bounds(Position::new(19, 19)));
        assert!(!model.is_in_bounds(Position::new(-1, 0)));
        assert!(!model.is_in_bounds(Position::new(20, 0)));
        assert!(!model.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_bounds_on_oversized_grid() {
        let model = GridModel::new(
            i32::MAX as usize + 10,
            Snake::new(Position::new(5, 5), Direction::Right),
            None,
        );

        assert!(model.is_in_bounds(Position::new(5, 5)));
        assert!(model.is_in_bounds(Position::new(i32::MAX - 1, 0)));
        assert!(!model.is_in_bounds(Position::new(-1, 0)));
    }

    #[test]
    fn test_new_model_defaults() {
        let model = GridModel::new(
            20,
            Snake::new(Position::new(10, 10), Direction::Right),
            None,
        );
        assert_eq!(model.score(), 0);
        assert_eq!(model.steps(), 0);
        assert_eq!(model.status(), GameStatus::Running);
        assert_eq!(model.food(), None);
    }
}
