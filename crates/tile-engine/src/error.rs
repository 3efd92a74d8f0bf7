use crate::engine::Direction;

/// Errors surfaced by board access, spawning and moves.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("coordinate ({x}, {y}) outside {width}x{height} board")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("tile value {0} is not a power of two >= 2")]
    InvalidValue(u32),
    #[error("unknown direction {0:?}; expected one of {dirs:?}", dirs = Direction::NAMES)]
    UnknownDirection(String),
    #[error("no empty cell to spawn into")]
    NoSpace,
    #[error("End")]
    GameEnded,
}

pub type Result<T> = std::result::Result<T, EngineError>;
