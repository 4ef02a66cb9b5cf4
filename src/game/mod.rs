//! Core snake simulation
//!
//! Everything here is pure game logic without any I/O or rendering
//! dependencies. A host drives it by feeding frame times and direction
//! requests, then reads the published [`GameState`] to draw.

pub mod action;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Axis, Direction, DirectionChange};
pub use clock::{ClockEvent, TICK_THRESHOLD, TickClock};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use error::GameError;
pub use grid::Grid;
pub use session::SnakeGame;
pub use state::{GameState, Outcome, PendingPosition, Phase, Position};
