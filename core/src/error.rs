use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid size must be between 1x1 and {max_rows}x{max_cols}", max_rows = crate::MAX_ROWS, max_cols = crate::MAX_COLS)]
    InvalidSize,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Unknown level, expected one of easy, medium, hard")]
    UnknownLevel,
}

pub type Result<T> = core::result::Result<T, GameError>;
