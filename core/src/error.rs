use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board width and height must both be positive")]
    InvalidDimensions,
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Cannot place {requested} traps on a board of {capacity} cells")]
    InvalidTrapCount {
        requested: CellCount,
        capacity: CellCount,
    },
    #[error("Board setup step called out of order or more than once")]
    ReentrantSetup,
    #[error("Board setup has not finished, no moves are accepted yet")]
    SetupIncomplete,
    #[error("Trap listed more than once at {0:?}")]
    DuplicateTrap(Coord2),
}

pub type Result<T> = core::result::Result<T, GameError>;
