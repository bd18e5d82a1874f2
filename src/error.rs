use thiserror::Error;

use crate::board::BOARD_SIZE;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("square ({row}, {col}) is outside the 8x8 board")]
    OutOfBounds { row: i64, col: i64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Validate raw coordinates before they reach the engine, which treats
/// off-board squares as a programming error.
pub fn checked_square(row: i64, col: i64) -> Result<(usize, usize), EngineError> {
    let size = BOARD_SIZE as i64;
    if (0..size).contains(&row) && (0..size).contains(&col) {
        Ok((row as usize, col as usize))
    } else {
        Err(EngineError::OutOfBounds { row, col })
    }
}
