use rand::{Rng, rngs::StdRng};
use tracing::{debug, info};

use super::{
    action::Direction,
    config::GameConfig,
    food::{BoardFull, place_food},
    score::{HighScore, ScoreRecord},
    state::{HeadingControl, Position, Snake},
};

/// Why a round stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The head ran into the body
    Collision,
    /// The snake fills the grid; no cell is left for food
    BoardFull,
    /// The player asked to leave mid-round
    Quit,
}

/// What happened during one call to [`GameEngine::update`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepInfo {
    /// Cell the head moved into, if it crossed a cell boundary
    pub entered: Option<Position>,
    /// Whether the snake ate food this frame
    pub ate_food: bool,
    /// Set on the frame the round ended
    pub outcome: Option<RoundOutcome>,
}

/// Owns all round state: the snake, the food cell and the score record.
///
/// The random source is injected so tests can make food placement
/// deterministic.
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
    snake: Snake,
    food: Option<Position>,
    score: ScoreRecord,
    outcome: Option<RoundOutcome>,
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine and set up the first round
    pub fn new(config: GameConfig, rng: R, stored: Option<HighScore>) -> Self {
        let snake = Self::spawn_snake(&config);
        let score = ScoreRecord::new(config.player_name.clone(), stored);
        let mut engine = Self {
            config,
            rng,
            snake,
            food: None,
            score,
            outcome: None,
        };
        engine.respawn_food();
        engine
    }

    /// Start a fresh round: new snake at the initial size and speed, fresh
    /// food, current score zeroed. `stored` is the best score re-read from
    /// storage and is merged into the record.
    pub fn reset(&mut self, stored: Option<HighScore>) {
        self.snake = Self::spawn_snake(&self.config);
        self.outcome = None;
        self.score.reset_round();
        self.score.merge_stored(stored);
        self.respawn_food();
        info!(
            best = self.score.best().score,
            holder = %self.score.best().name,
            "round reset"
        );
    }

    /// Advance one frame
    pub fn update(&mut self) -> StepInfo {
        if self.outcome.is_some() || !self.snake.is_alive() {
            return StepInfo::default();
        }

        let entered = self.snake.update();
        let mut info = StepInfo {
            entered,
            ..Default::default()
        };

        if !self.snake.is_alive() {
            info!(score = self.score.current(), head = ?self.snake.head(), "snake collided with itself");
            self.outcome = Some(RoundOutcome::Collision);
            info.outcome = self.outcome;
            return info;
        }

        if entered.is_some() && entered == self.food {
            self.score.increment();
            self.snake.grow_body();
            self.snake
                .accelerate(self.config.speed_increment, self.config.max_speed);
            info.ate_food = true;
            debug!(
                score = self.score.current(),
                speed = self.snake.speed(),
                size = self.snake.size(),
                "food eaten"
            );
            self.respawn_food();
            info.outcome = self.outcome;
        }

        info
    }

    /// Heading-only access to the snake for the controller
    pub fn steer(&mut self) -> HeadingControl<'_> {
        self.snake.steer()
    }

    /// Close the round, recording `outcome` if the round has not already
    /// ended on its own. Returns the new best when this round set one.
    pub fn finish_round(&mut self, outcome: RoundOutcome) -> Option<HighScore> {
        self.outcome.get_or_insert(outcome);
        self.score.finish_round()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Current food cell; `None` once the board is full
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn score(&self) -> &ScoreRecord {
        &self.score
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn set_round(&mut self, snake: Snake, food: Option<Position>) {
        self.snake = snake;
        self.food = food;
    }

    /// Head at the grid centre facing up, body trailing downwards
    fn spawn_snake(config: &GameConfig) -> Snake {
        let center = Position::new(
            (config.grid_width / 2) as i32,
            (config.grid_height / 2) as i32,
        );
        Snake::straight(
            center,
            Direction::Up,
            config.initial_snake_length,
            config.initial_speed,
            config.grid_width,
            config.grid_height,
        )
    }

    fn respawn_food(&mut self) {
        match place_food(
            &self.snake,
            self.config.grid_width,
            self.config.grid_height,
            &mut self.rng,
        ) {
            Ok(food) => self.food = Some(food),
            Err(BoardFull) => {
                info!(
                    size = self.snake.size(),
                    cells = self.config.cell_count(),
                    "board full"
                );
                self.food = None;
                self.outcome = Some(RoundOutcome::BoardFull);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn engine(config: GameConfig) -> GameEngine<StdRng> {
        GameEngine::new(config, StdRng::seed_from_u64(11), None)
    }

    fn fast_config(width: usize, height: usize) -> GameConfig {
        GameConfig {
            initial_speed: 1.0,
            ..GameConfig::new(width, height)
        }
    }

    #[test]
    fn test_new_round() {
        let engine = engine(GameConfig::small());

        assert!(engine.snake().is_alive());
        assert_eq!(engine.score().current(), 0);
        assert_eq!(engine.snake().size(), 1);
        assert_eq!(engine.snake().head(), Position::new(5, 5));
        assert_eq!(engine.snake().heading(), Direction::Up);
        assert_eq!(engine.snake().speed(), 0.1);
        let food = engine.food().unwrap();
        assert!(!engine.snake().occupies(food));
        assert_eq!(engine.outcome(), None);
    }

    #[test]
    fn test_eating_food_two_cells_ahead() {
        let mut engine = engine(fast_config(10, 10));
        assert!(engine.steer().request(Direction::Right));
        engine.food = Some(Position::new(7, 5));

        let first = engine.update();
        assert_eq!(first.entered, Some(Position::new(6, 5)));
        assert!(!first.ate_food);

        let second = engine.update();
        assert!(second.ate_food);
        assert_eq!(engine.snake().head(), Position::new(7, 5));
        assert_eq!(engine.score().current(), 1);
        assert_eq!(engine.snake().size(), 2);

        let food = engine.food().unwrap();
        assert!(!engine.snake().occupies(food));
        assert_ne!(food, Position::new(7, 5));

        // Growth materialises on the next transition
        engine.food = Some(Position::new(0, 0));
        engine.update();
        assert_eq!(engine.snake().len(), 2);
    }

    #[test]
    fn test_growth_and_speed_per_food() {
        let config = GameConfig::new(20, 20);
        let mut engine = engine(config.clone());
        assert!(engine.steer().request(Direction::Right));

        let mut eaten = 0;
        while eaten < 5 {
            let head = engine.snake().head();
            engine.food = Some(head.wrapped_step(Direction::Right, 20, 20));
            loop {
                if engine.update().ate_food {
                    eaten += 1;
                    break;
                }
            }
            assert_eq!(engine.snake().size(), 1 + eaten);
            let expected = config.initial_speed + config.speed_increment * eaten as f32;
            assert!((engine.snake().speed() - expected).abs() < 1e-5);
        }
        assert_eq!(engine.score().current(), 5);
    }

    #[test]
    fn test_dead_snake_does_not_update() {
        let mut engine = engine(fast_config(10, 10));
        engine.snake = Snake::from_body(
            vec![
                Position::new(2, 1),
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(3, 2),
            ],
            Direction::Down,
            1.0,
            10,
            10,
        ).unwrap();
        engine.food = Some(Position::new(8, 8));

        let info = engine.update();
        assert_eq!(info.outcome, Some(RoundOutcome::Collision));
        assert_eq!(engine.outcome(), Some(RoundOutcome::Collision));

        let head = engine.snake().head();
        assert_eq!(engine.update(), StepInfo::default());
        assert_eq!(engine.snake().head(), head);
    }

    #[test]
    fn test_board_full_ends_round() {
        let mut engine = engine(fast_config(2, 1));
        engine.snake = Snake::new(Position::new(0, 0), Direction::Right, 1.0, 2, 1);
        engine.food = Some(Position::new(1, 0));

        let info = engine.update();
        assert!(info.ate_food);
        assert_eq!(engine.outcome(), None);

        // Growth fills the second cell; the next meal has nowhere to go
        engine.food = Some(Position::new(0, 0));
        let info = engine.update();
        assert!(info.ate_food);
        assert_eq!(info.outcome, Some(RoundOutcome::BoardFull));
        assert_eq!(engine.food(), None);
        assert_eq!(engine.update(), StepInfo::default());
    }

    #[test]
    fn test_single_cell_grid_is_full_from_the_start() {
        let engine = engine(GameConfig::new(1, 1));
        assert_eq!(engine.outcome(), Some(RoundOutcome::BoardFull));
        assert_eq!(engine.food(), None);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut engine = engine(fast_config(10, 10));
        engine.steer().request(Direction::Right);
        engine.food = Some(Position::new(6, 5));
        engine.update();
        assert_eq!(engine.score().current(), 1);
        assert_eq!(engine.finish_round(RoundOutcome::Quit), Some(HighScore::new("player", 1)));

        engine.reset(Some(HighScore::new("bob", 7)));

        assert_eq!(engine.score().current(), 0);
        assert_eq!(engine.snake().size(), 1);
        assert_eq!(engine.snake().speed(), 1.0);
        assert_eq!(engine.snake().head(), Position::new(5, 5));
        assert_eq!(engine.outcome(), None);
        assert!(engine.food().is_some());
        assert_eq!(engine.score().best(), &HighScore::new("bob", 7));
    }

    #[test]
    fn test_longer_initial_snake() {
        let config = GameConfig {
            initial_snake_length: 3,
            ..GameConfig::small()
        };
        let mut engine = engine(config);

        assert_eq!(
            engine.snake().cells().iter().copied().collect::<Vec<_>>(),
            vec![Position::new(5, 5), Position::new(5, 6), Position::new(5, 7)]
        );
        assert!(!engine.snake().occupies(engine.food().unwrap()));

        engine.food = Some(Position::new(0, 0));
        engine.update();
        engine.reset(None);
        assert_eq!(engine.snake().size(), 3);
        assert_eq!(engine.snake().progress(), 0.0);
    }

    #[test]
    fn test_finish_round_keeps_natural_outcome() {
        let mut engine = engine(GameConfig::new(1, 1));
        engine.finish_round(RoundOutcome::Quit);
        assert_eq!(engine.outcome(), Some(RoundOutcome::BoardFull));
    }

    proptest! {
        #[test]
        fn prop_head_stays_in_bounds(
            seed in any::<u64>(),
            turns in proptest::collection::vec(0u8..4, 1..200),
        ) {
            let config = GameConfig {
                initial_speed: 0.5,
                ..GameConfig::new(7, 5)
            };
            let mut engine = GameEngine::new(config, StdRng::seed_from_u64(seed), None);

            for turn in turns {
                let direction = match turn {
                    0 => Direction::Up,
                    1 => Direction::Down,
                    2 => Direction::Left,
                    _ => Direction::Right,
                };
                engine.steer().request(direction);
                engine.update();

                let head = engine.snake().head();
                prop_assert!((0..7).contains(&head.x));
                prop_assert!((0..5).contains(&head.y));
                let (x, y) = engine.snake().head_position();
                prop_assert!((0.0..7.0).contains(&x) && (0.0..5.0).contains(&y));
            }
        }
    }
}
