use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid size must be between 3 and 10")]
    InvalidSize,
    #[error("Mine count must be between 1 and {max}")]
    InvalidMineCount { max: CellCount },
    #[error("Selection does not name a square")]
    InvalidSelection,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mine mask is not a playable square grid")]
    InvalidBoardShape,
    #[error("Game already ended, no new moves are accepted")]
    GameOver,
}

pub type Result<T> = core::result::Result<T, GameError>;
