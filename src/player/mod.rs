//! Player trait and implementations
//!
//! This module defines the Player trait and provides concrete implementations:
//! - RandomPlayer: places and fires uniformly at random
//! - CliPlayer: interactive command-line player

use std::io;

use thiserror::Error;

use crate::core::{Board, Coord, Placement, RulesError, ShipType, ShotLog, ShotOutcome};

/// Why a player could not produce a decision.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The decision was unusable; ask again.
    #[error(transparent)]
    Rules(#[from] RulesError),
    /// The input stream ended.
    #[error("input closed")]
    InputClosed,
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Interface implemented by different player types.
///
/// A Player is responsible for:
/// - Choosing where each ship goes
/// - Selecting targets to attack
/// - Handling feedback on rejected decisions and shot results
///
/// The engine rejects illegal decisions; the driver asks again.
pub trait Player {
    /// Display name used in driver output.
    fn name(&self) -> &str;

    /// Choose a start cell and orientation for `ship`.
    fn place_ship(&mut self, ship: &ShipType) -> Result<Placement, PlayerError>;

    /// Choose the next target given the shots already fired.
    fn make_move(&mut self, shots: &ShotLog) -> Result<Coord, PlayerError>;

    /// Show the player its own board while it places ships.
    fn show_board(&mut self, _board: &Board) {}

    /// Inform the player that its last decision was rejected.
    fn handle_rejection(&mut self, _error: &RulesError) {}

    /// Report how the player's shot at `coord` resolved.
    fn handle_shot_result(&mut self, _coord: Coord, _outcome: &ShotOutcome) {}
}

pub mod ai;
pub use ai::RandomPlayer;

pub mod cli;
pub use cli::{CliPlayer, Prompt, StdinLines};
