//! Core battleship rules engine.
//!
//! Board state, fleet configuration, placement and move validation, hit
//! resolution and win detection. Nothing in here performs I/O.

pub mod board;
pub mod common;
pub mod config;
pub mod game;
pub mod ship;

// Re-export commonly used types
pub use board::{Board, Cell, Coord, Grid};
pub use common::{ConfigError, RulesError, ShotOutcome};
pub use config::{Fleet, GameConfig, BOARD_SIZE, CLASSIC_SHIPS};
pub use game::{GameEngine, GameStatus, PlayerId, Shot, ShotLog};
pub use ship::{Orientation, PlacedShip, Placement, ShipType};
