//! Headless simulation driver
//!
//! Plays a batch of games without a terminal, stepping the engine with a
//! fixed frame time and letting the [`Autopilot`] steer. Useful for soak
//! testing the simulation and for comparing configurations.
//!
//! # Example
//!
//! ```rust
//! use grid_snake::game::GameConfig;
//! use grid_snake::modes::{HeadlessConfig, HeadlessMode};
//!
//! let config = HeadlessConfig {
//!     games: 3,
//!     ..HeadlessConfig::default()
//! };
//! let mut mode = HeadlessMode::new(GameConfig::small().with_seed(1), config)?;
//! let stats = mode.run();
//! assert_eq!(stats.total_games(), 3);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Result, ensure};
use tracing::{debug, info};

use super::autopilot::Autopilot;
use crate::game::{GameConfig, SnakeGame};
use crate::metrics::{GameEnd, RunStats};

/// Configuration for headless mode
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Number of games to play
    pub games: usize,
    /// Give up on a game after this many ticks
    pub max_steps: u32,
    /// Simulated time per frame
    pub frame_ms: f64,
    /// Log a progress line every N games
    pub log_frequency: usize,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            games: 100,
            max_steps: 10_000,
            frame_ms: 1000.0 / 60.0,
            log_frequency: 10,
        }
    }
}

pub struct HeadlessMode {
    game: SnakeGame,
    pilot: Autopilot,
    config: HeadlessConfig,
    stats: RunStats,
}

impl HeadlessMode {
    pub fn new(game_config: GameConfig, config: HeadlessConfig) -> Result<Self> {
        ensure!(
            config.frame_ms.is_finite() && config.frame_ms > 0.0,
            "frame time must be positive, got {}",
            config.frame_ms
        );

        let game = SnakeGame::new(game_config)?;
        let pilot = Autopilot::new(game.engine().grid());

        Ok(Self {
            game,
            pilot,
            config,
            stats: RunStats::new(100),
        })
    }

    /// Play every game and return the collected statistics
    pub fn run(&mut self) -> &RunStats {
        info!(
            games = self.config.games,
            width = self.game.config().grid_width,
            height = self.game.config().grid_height,
            "starting headless run"
        );

        for game_index in 0..self.config.games {
            let (length, steps, end) = self.run_game();
            self.stats.record_game(length, steps, end);
            debug!(game = game_index, length, steps, ?end, "game finished");

            if self.config.log_frequency > 0 && (game_index + 1) % self.config.log_frequency == 0 {
                info!("{}", self.stats.format_summary());
            }
        }

        &self.stats
    }

    /// Play one game to completion or the step limit
    fn run_game(&mut self) -> (usize, u32, GameEnd) {
        self.game.reset(true);

        loop {
            let state = self.game.snapshot();
            if let Some(outcome) = state.outcome {
                return (state.len(), state.steps, GameEnd::Finished(outcome));
            }
            if state.steps >= self.config.max_steps {
                return (state.len(), state.steps, GameEnd::TimedOut);
            }

            if let Some(direction) = self.pilot.choose(state) {
                self.game.set_direction(direction);
            }

            // Keep stepping frames until the turn has been consumed by a tick
            loop {
                let result = self.game.advance(self.config.frame_ms);
                if result.ticked || result.terminated {
                    break;
                }
            }
        }
    }
}
