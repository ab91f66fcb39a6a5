//! Rules engine and turn driver for two-player Battleship.
//!
//! - [`core`]: boards, fleet configuration and the [`GameEngine`] rules.
//! - [`player`]: the [`Player`] trait with interactive and random players.
//! - [`runner`]: the [`GameRunner`] turn loop tying them together.

pub mod core;
mod logging;
pub mod player;
pub mod runner;

pub use crate::core::*;
pub use logging::{init_logging, init_logging_with, LOG_ENV};
pub use player::{CliPlayer, Player, PlayerError, Prompt, RandomPlayer, StdinLines};
pub use runner::{GameRunner, GameSummary, MAX_ATTEMPTS};
