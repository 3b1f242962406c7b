use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    config::{GameConfig, MAX_GRID_SIZE},
    direction::Direction,
    food::FoodPlacer,
    state::{CollisionType, GameStatus, GridModel, Position, Snake},
};

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// The snake moved one cell
    Continue,
    /// The snake moved onto food and grew
    Ate,
    /// The move would leave the board or hit the body; the model was not touched
    Collided(CollisionType),
}

/// The engine that advances a [`GridModel`] one tick at a time
pub struct SimulationEngine<R: Rng = StdRng> {
    grid_size: usize,
    food_placer: FoodPlacer<R>,
}

impl SimulationEngine<StdRng> {
    /// Create an engine seeded from the OS entropy source
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn seeded(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulationEngine<R> {
    /// The grid size is clamped to `1..=MAX_GRID_SIZE` for configs that skipped validation
    pub fn with_rng(config: &GameConfig, rng: R) -> Self {
        Self {
            grid_size: config.grid_size.clamp(1, MAX_GRID_SIZE),
            food_placer: FoodPlacer::new(rng, config.max_food_attempts),
        }
    }

    /// Build a fresh model: one centered segment moving right, food placed
    pub fn new_model(&mut self) -> GridModel {
        let center = (self.grid_size / 2) as i32;
        let snake = Snake::new(Position::new(center, center), Direction::Right);

        let mut model = GridModel::new(self.grid_size, snake, None);
        model.food = Some(self.food_placer.place(&model.occupied_cells(), self.grid_size));
        model
    }

    /// Advance the model by one tick
    ///
    /// `pending` is the direction queued by input since the last tick. It is
    /// dropped if it would reverse the snake onto itself.
    pub fn tick(&mut self, model: &mut GridModel, pending: Option<Direction>) -> TickResult {
        if model.status != GameStatus::Running {
            return TickResult::Continue;
        }

        let current = model.snake.direction();
        let direction = match pending {
            Some(next) if !current.is_opposite(next) => next,
            _ => current,
        };

        let new_head = model.snake.head().moved_in_direction(direction);

        if let Some(collision) = self.check_collision(model, new_head) {
            return TickResult::Collided(collision);
        }

        model.snake.set_direction(direction);
        model.steps += 1;

        let ate_food = model.food == Some(new_head);
        model.snake.advance(new_head, ate_food);

        if !ate_food {
            return TickResult::Continue;
        }

        model.score += 1;
        model.food = None;
        let food = self
            .food_placer
            .place(&model.occupied_cells(), model.grid_size);
        model.food = Some(food);
        debug!(
            "Ate at ({}, {}), score {}, length {}",
            new_head.x,
            new_head.y,
            model.score,
            model.snake.len()
        );

        TickResult::Ate
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, model: &GridModel, pos: Position) -> Option<CollisionType> {
        if !model.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail still counts: it has not moved away yet when the head arrives
        if model.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SimulationEngine {
        SimulationEngine::seeded(&GameConfig::default(), 1)
    }

    fn model_with(head: Position, tail: &[Position], direction: Direction) -> GridModel {
        GridModel::new(20, Snake::from_segments(head, tail, direction), None)
    }

    #[test]
    fn test_new_model() {
        let mut engine = engine();
        let model = engine.new_model();

        assert_eq!(model.status(), GameStatus::Running);
        assert_eq!(model.score(), 0);
        assert_eq!(model.snake().len(), 1);
        assert_eq!(model.snake().head(), Position::new(10, 10));
        assert_eq!(model.snake().direction(), Direction::Right);

        let food = model.food().unwrap();
        assert!(model.is_in_bounds(food));
        assert!(!model.is_occupied_by_snake(food));
    }

    #[test]
    fn test_unvalidated_grid_size_is_clamped() {
        let mut engine = SimulationEngine::seeded(&GameConfig::new(0), 1);
        let model = engine.new_model();
        assert_eq!(model.grid_size(), 1);
        assert_eq!(model.snake().head(), Position::new(0, 0));

        let mut engine = SimulationEngine::seeded(&GameConfig::new(usize::MAX), 1);
        let model = engine.new_model();
        assert_eq!(model.grid_size(), MAX_GRID_SIZE);
        let center = (MAX_GRID_SIZE / 2) as i32;
        assert_eq!(model.snake().head(), Position::new(center, center));
        assert!(model.is_in_bounds(model.food().unwrap()));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut model = model_with(Position::new(10, 10), &[], Direction::Right);
        model.food = Some(Position::new(0, 0));

        let result = engine.tick(&mut model, None);

        assert_eq!(result, TickResult::Continue);
        assert_eq!(model.snake().head(), Position::new(11, 10));
        assert_eq!(model.snake().len(), 1);
        assert_eq!(model.steps(), 1);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut model = model_with(Position::new(10, 10), &[], Direction::Right);
        model.food = Some(Position::new(11, 10));

        let result = engine.tick(&mut model, None);

        assert_eq!(result, TickResult::Ate);
        assert_eq!(model.score(), 1);
        assert_eq!(
            model.snake().segments().collect::<Vec<_>>(),
            vec![Position::new(11, 10), Position::new(10, 10)]
        );
        let food = model.food().unwrap();
        assert!(!model.is_occupied_by_snake(food));
    }

    #[test]
    fn test_wall_collision_leaves_model_untouched() {
        let mut engine = engine();
        let mut model = model_with(Position::new(19, 4), &[], Direction::Right);
        model.food = Some(Position::new(2, 2));
        let before = model.clone();

        let result = engine.tick(&mut model, None);

        assert_eq!(result, TickResult::Collided(CollisionType::Wall));
        assert_eq!(model, before);
    }

    #[test]
    fn test_wall_collision_at_origin() {
        let mut engine = engine();
        let mut model = model_with(Position::new(0, 0), &[], Direction::Up);

        assert_eq!(
            engine.tick(&mut model, Some(Direction::Left)),
            TickResult::Collided(CollisionType::Wall)
        );
        // The turn was not committed
        assert_eq!(model.snake().direction(), Direction::Up);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();
        let mut model = model_with(
            Position::new(5, 5),
            &[
                Position::new(4, 5),
                Position::new(3, 5),
                Position::new(2, 5),
            ],
            Direction::Right,
        );

        engine.tick(&mut model, None);
        engine.tick(&mut model, Some(Direction::Down));
        engine.tick(&mut model, Some(Direction::Left));
        let before = model.clone();
        let result = engine.tick(&mut model, Some(Direction::Up));

        assert_eq!(result, TickResult::Collided(CollisionType::SelfCollision));
        assert_eq!(model, before);
    }

    #[test]
    fn test_moving_into_tail_collides() {
        let mut engine = engine();
        // A 2x2 loop: the head's next cell is the current tail
        let mut model = model_with(
            Position::new(5, 5),
            &[
                Position::new(6, 5),
                Position::new(6, 6),
                Position::new(5, 6),
            ],
            Direction::Left,
        );

        assert_eq!(
            engine.tick(&mut model, Some(Direction::Down)),
            TickResult::Collided(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();
        let mut model = model_with(Position::new(10, 10), &[Position::new(9, 10)], Direction::Right);

        let result = engine.tick(&mut model, Some(Direction::Left));

        assert_eq!(result, TickResult::Continue);
        assert_eq!(model.snake().direction(), Direction::Right);
        assert_eq!(model.snake().head(), Position::new(11, 10));
    }

    #[test]
    fn test_turn_is_adopted() {
        let mut engine = engine();
        let mut model = model_with(Position::new(10, 10), &[], Direction::Right);

        engine.tick(&mut model, Some(Direction::Down));

        assert_eq!(model.snake().direction(), Direction::Down);
        assert_eq!(model.snake().head(), Position::new(10, 11));
    }

    #[test]
    fn test_not_running_is_noop() {
        let mut engine = engine();
        let mut model = engine.new_model();
        model.status = GameStatus::Paused;
        let before = model.clone();

        assert_eq!(engine.tick(&mut model, Some(Direction::Up)), TickResult::Continue);
        assert_eq!(model, before);
    }

    #[test]
    fn test_length_grows_only_on_food() {
        let mut engine = engine();
        let mut model = engine.new_model();
        let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];

        for i in 0..200 {
            let len_before = model.snake().len();
            let score_before = model.score();
            let food_before = model.food();
            let pending = Some(turns[(i / 3) % turns.len()]);

            match engine.tick(&mut model, pending) {
                TickResult::Ate => {
                    assert_eq!(Some(model.snake().head()), food_before);
                    assert_eq!(model.snake().len(), len_before + 1);
                    assert_eq!(model.score(), score_before + 1);
                }
                TickResult::Continue => {
                    assert_ne!(Some(model.snake().head()), food_before);
                    assert_eq!(model.snake().len(), len_before);
                    assert_eq!(model.score(), score_before);
                }
                TickResult::Collided(_) => break,
            }
        }
    }
}
