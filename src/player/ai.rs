use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use crate::core::{Coord, Orientation, Placement, RulesError, ShipType, ShotLog};

use super::{Player, PlayerError};

/// Player that places ships and fires uniformly at random.
///
/// Placements always fit on the board but may overlap an earlier ship; the
/// driver asks again when that happens. Shots never repeat a fired cell.
pub struct RandomPlayer {
    name: String,
    board_size: usize,
    rng: SmallRng,
}

impl RandomPlayer {
    pub fn new(name: impl Into<String>, board_size: usize, rng: SmallRng) -> Self {
        Self {
            name: name.into(),
            board_size,
            rng,
        }
    }

    /// Deterministic player for reproducible games.
    pub fn seeded(name: impl Into<String>, board_size: usize, seed: u64) -> Self {
        Self::new(name, board_size, SmallRng::seed_from_u64(seed))
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn place_ship(&mut self, ship: &ShipType) -> Result<Placement, PlayerError> {
        let size = self.board_size;
        // max start along the extending axis keeps the far edge on the board
        let reach = size.checked_sub(ship.length()).ok_or_else(|| {
            RulesError::out_of_bounds(0, ship.length().saturating_sub(1))
        })?;
        let orientation = if self.rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let (max_r, max_c) = match orientation {
            Orientation::Horizontal => (size - 1, reach),
            Orientation::Vertical => (reach, size - 1),
        };
        let row = self.rng.random_range(0..=max_r);
        let col = self.rng.random_range(0..=max_c);
        Ok(Placement::new((row, col), orientation))
    }

    fn make_move(&mut self, shots: &ShotLog) -> Result<Coord, PlayerError> {
        shots.untried().choose(&mut self.rng).ok_or_else(|| {
            // every cell has been fired at
            let last = shots.board_size().saturating_sub(1);
            PlayerError::Rules(RulesError::AlreadyShot(Coord::new(last, last)))
        })
    }
}
