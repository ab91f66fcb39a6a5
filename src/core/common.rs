//! Common types for Battleship: rules errors and shot results.

use thiserror::Error;

use crate::core::board::Coord;

/// Result of a shot resolved against the opponent's board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShotOutcome {
    /// Shot struck a ship cell that still had other cells afloat.
    Hit,
    /// Shot landed on open water.
    Miss,
    /// Shot struck the last remaining cell of a ship, carrying its name.
    Sunk(String),
}

impl ShotOutcome {
    /// `true` for both plain hits and sinking hits.
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }
}

/// Errors returned by placement and move validation.
///
/// Every variant is recoverable: the caller reports it and asks for
/// another decision.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Named ship not found in the fleet configuration.
    #[error("invalid ship type: {0}")]
    UnknownShipType(String),
    /// A coordinate (or the far end of a ship) lies off the board.
    #[error("coordinates ({row}, {col}) are out of bounds")]
    OutOfBounds { row: i64, col: i64 },
    /// Ship placement covers a cell already holding a ship.
    #[error("ship placement overlaps with another ship at {0}")]
    Overlap(Coord),
    /// Move input was not a pair of integers.
    #[error("invalid move coordinates: {0:?} is not a pair of integers")]
    MalformedCoordinate(String),
    /// Placement input was not two integers and an orientation.
    #[error("invalid placement: {0:?} is not row, col, orientation")]
    MalformedPlacement(String),
    /// The player already fired at this coordinate.
    #[error("coordinates {0} have already been shot at")]
    AlreadyShot(Coord),
}

impl RulesError {
    pub(crate) fn out_of_bounds(row: usize, col: usize) -> Self {
        RulesError::OutOfBounds {
            row: row as i64,
            col: col as i64,
        }
    }
}

/// Errors raised while building a fleet or game configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("fleet must contain at least one ship type")]
    EmptyFleet,
    #[error("ship type names must not be empty")]
    EmptyName,
    #[error("ship type {0:?} is listed more than once")]
    DuplicateShip(String),
    #[error("ship type {0:?} must have a positive length")]
    ZeroLength(String),
    #[error("board size must be at least 1")]
    EmptyBoard,
    #[error("ship type {name:?} of length {length} does not fit on a {board_size}x{board_size} board")]
    ShipTooLong {
        name: String,
        length: usize,
        board_size: usize,
    },
}
