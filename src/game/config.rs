use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Configuration for the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Ticks per second at normal speed
    pub ticks_per_second: f64,
    /// Speed factor applied while a direction key is repeated
    pub speed_multiplier: f64,
    /// Publish interpolated in-between bodies for rendering
    pub smooth_interpolation: bool,
    /// Fixed seed for reproducible games; entropy when unset
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 10,
            grid_height: 10,
            ticks_per_second: 8.0,
            speed_multiplier: 2.0,
            smooth_interpolation: false,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_smooth_interpolation(mut self, enabled: bool) -> Self {
        self.smooth_interpolation = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Reject dimensions and speeds the engine cannot run with.
    ///
    /// The grid must hold the two-cell starting snake plus one food cell.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if i32::try_from(self.grid_width).is_err() || i32::try_from(self.grid_height).is_err() {
            return Err(GameError::InvalidConfig(format!(
                "grid {}x{} exceeds coordinate range",
                self.grid_width, self.grid_height
            )));
        }
        if self.grid_width.saturating_mul(self.grid_height) < 3 {
            return Err(GameError::InvalidConfig(format!(
                "grid {}x{} cannot fit a snake and food",
                self.grid_width, self.grid_height
            )));
        }
        if !self.ticks_per_second.is_finite() || self.ticks_per_second <= 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "ticks_per_second must be positive, got {}",
                self.ticks_per_second
            )));
        }
        if !self.speed_multiplier.is_finite() || self.speed_multiplier < 1.0 {
            return Err(GameError::InvalidConfig(format!(
                "speed_multiplier must be at least 1, got {}",
                self.speed_multiplier
            )));
        }
        Ok(())
    }
}
