use super::{
    action::{Direction, DirectionChange},
    config::GameConfig,
    engine::{GameEngine, StepResult},
    error::GameError,
    state::{GameState, Phase},
};

/// One engine plus the state it drives.
///
/// This is the surface a host talks to: it forwards frame times, key presses
/// and releases, and reads [`SnakeGame::snapshot`] to draw.
pub struct SnakeGame {
    engine: GameEngine,
    state: GameState,
}

impl SnakeGame {
    /// Build a game with an empty, not yet started board
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Ok(Self {
            engine: GameEngine::new(config)?,
            state: GameState::idle(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Re-seed snake, heading and food
    pub fn reset(&mut self, start_immediately: bool) {
        self.state = self.engine.reset(start_immediately);
    }

    /// Drive one frame
    pub fn advance(&mut self, elapsed_ms: f64) -> StepResult {
        self.engine.advance(&mut self.state, elapsed_ms)
    }

    pub fn set_direction(&mut self, direction: Direction) -> DirectionChange {
        self.engine.set_direction(&mut self.state, direction)
    }

    pub fn on_key_release(&mut self) {
        self.engine.release_key();
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Replace the state wholesale, e.g. to set up a known position.
    ///
    /// The loaded state starts from an empty tick accumulator with no boost.
    pub fn load_state(&mut self, state: GameState) {
        self.engine.restart_clock();
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_is_idle_and_empty() {
        let game = SnakeGame::new(GameConfig::default().with_seed(3)).unwrap();

        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.snapshot().is_empty());
        assert!(game.snapshot().food.is_none());
    }

    #[test]
    fn test_idle_game_ignores_frames() {
        let mut game = SnakeGame::new(GameConfig::default().with_seed(3)).unwrap();
        game.advance(10_000.0);
        assert_eq!(game.snapshot(), &GameState::idle());

        game.reset(false);
        let laid_out = game.snapshot().clone();
        game.advance(10_000.0);
        assert_eq!(game.snapshot(), &laid_out);
    }

    #[test]
    fn test_reset_starts_running_game() {
        let mut game = SnakeGame::new(GameConfig::default().with_seed(3)).unwrap();
        game.reset(true);

        assert_eq!(game.phase(), Phase::Running);
        let result = game.advance(1_000.0);
        assert!(result.ticked);
        assert_eq!(game.snapshot().steps, 1);
    }

    #[test]
    fn test_reset_leaves_crashed_state() {
        let mut game = SnakeGame::new(GameConfig::default().with_seed(9)).unwrap();
        game.reset(true);

        // Run straight on until a wall stops it
        for _ in 0..20 {
            game.advance(1_000.0);
        }
        assert_eq!(game.phase(), Phase::Crashed);

        game.reset(true);
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.snapshot().steps, 0);
    }

    #[test]
    fn test_key_release_ends_boost() {
        let mut game = SnakeGame::new(GameConfig::default().with_seed(5)).unwrap();
        game.reset(true);
        let heading = game.snapshot().direction.unwrap();

        assert_eq!(game.set_direction(heading), DirectionChange::Boosted);
        assert!(game.engine().clock().is_boosted());

        game.on_key_release();
        assert!(!game.engine().clock().is_boosted());
    }

    #[test]
    fn test_load_state_starts_a_fresh_tick() {
        use crate::game::Position;

        let mut game = SnakeGame::new(GameConfig::default().with_seed(5)).unwrap();
        game.reset(true);
        let heading = game.snapshot().direction.unwrap();
        game.set_direction(heading);
        // Most of a tick, still boosted
        assert!(!game.advance(50.0).ticked);

        game.load_state(GameState::new(
            vec![Position::new(5, 5), Position::new(5, 6)],
            Direction::Up,
            Position::new(0, 0),
        ));
        assert!(!game.engine().clock().is_boosted());
        assert_eq!(game.engine().clock().accumulator(), 0.0);

        // 8 ticks/s needs the full 125ms from scratch
        assert!(!game.advance(30.0).ticked);
        assert!(!game.advance(90.0).ticked);
        assert!(game.advance(10.0).ticked);
        assert_eq!(game.snapshot().head(), Some(Position::new(5, 4)));
    }
}
