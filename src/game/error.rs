use thiserror::Error;

/// Errors surfaced by the simulation core.
///
/// Collisions are not errors; they end up as an [`Outcome`](super::Outcome) on
/// the game state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("no free cell left on the grid")]
    GridFull,
}
