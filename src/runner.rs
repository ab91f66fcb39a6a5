//! Turn driver: both players place their fleets, then alternate shots until
//! one of them has struck every opponent ship cell.

use std::io::Write;

use anyhow::{bail, Context};
use log::{info, warn};
use serde::Serialize;

use crate::core::{Coord, GameEngine, PlayerId, RulesError, ShipType, ShotOutcome};
use crate::player::{Player, PlayerError};

/// Consecutive rejected decisions tolerated before the game is aborted.
pub const MAX_ATTEMPTS: usize = 1000;

/// Outcome of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub winner: PlayerId,
    pub winner_name: String,
    /// Shots fired by both players together.
    pub turns: usize,
    pub shots: [usize; 2],
    pub hits: [usize; 2],
}

/// Owns an engine and two players and runs one game to completion.
pub struct GameRunner<W> {
    engine: GameEngine,
    players: [Box<dyn Player>; 2],
    out: W,
}

impl<W: Write> GameRunner<W> {
    pub fn new(
        engine: GameEngine,
        player1: Box<dyn Player>,
        player2: Box<dyn Player>,
        out: W,
    ) -> Self {
        Self {
            engine,
            players: [player1, player2],
            out,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Place both fleets, then play the battle out.
    pub fn run(&mut self) -> anyhow::Result<GameSummary> {
        self.placement_phase()?;
        self.battle_phase()
    }

    /// Ask each player in turn for every ship of the fleet.
    pub fn placement_phase(&mut self) -> anyhow::Result<()> {
        info!("placement phase started");
        writeln!(self.out, "\n=== Ship Placement Phase ===")?;
        let ships: Vec<ShipType> = self.engine.fleet().iter().cloned().collect();
        for id in PlayerId::ALL {
            writeln!(
                self.out,
                "\n{} - Place your ships:",
                self.players[id.index()].name()
            )?;
            for ship in &ships {
                self.place_one(id, ship)?;
            }
        }
        Ok(())
    }

    fn place_one(&mut self, id: PlayerId, ship: &ShipType) -> anyhow::Result<()> {
        let player = &mut self.players[id.index()];
        for _ in 0..MAX_ATTEMPTS {
            player.show_board(self.engine.board(id));
            let placement = match player.place_ship(ship) {
                Ok(placement) => placement,
                Err(PlayerError::Rules(err)) => {
                    reject(&mut self.out, &mut **player, "placement", &err)?;
                    continue;
                }
                Err(err) => {
                    return Err(err).with_context(|| {
                        format!("{} failed to place {}", player.name(), ship.name())
                    })
                }
            };
            let (start, orientation) = (placement.start, placement.orientation);
            if let Err(err) = self
                .engine
                .validate_placement(id, ship.name(), start, orientation)
            {
                reject(&mut self.out, &mut **player, "placement", &err)?;
                continue;
            }
            self.engine
                .place_ship(id, ship.name(), start, orientation)?;
            writeln!(
                self.out,
                "Successfully placed {} at {} with orientation {}",
                ship.name(),
                start,
                orientation
            )?;
            return Ok(());
        }
        bail!(
            "{} could not place {} after {} attempts",
            player.name(),
            ship.name(),
            MAX_ATTEMPTS
        )
    }

    /// Alternate shots, Player 1 first, until someone wins.
    pub fn battle_phase(&mut self) -> anyhow::Result<GameSummary> {
        info!("battle phase started");
        writeln!(self.out, "\n=== Battle Phase ===")?;
        let mut current = PlayerId::One;
        let mut turns = 0;
        loop {
            turns += 1;
            writeln!(self.out, "\n{}'s turn:", self.players[current.index()].name())?;
            let (coord, outcome) = self.take_shot(current)?;
            self.players[current.index()].handle_shot_result(coord, &outcome);
            match &outcome {
                ShotOutcome::Hit => writeln!(self.out, "Hit at {}!", coord)?,
                ShotOutcome::Miss => writeln!(self.out, "Miss at {}.", coord)?,
                ShotOutcome::Sunk(name) => {
                    writeln!(self.out, "Hit at {}! {} sunk.", coord, name)?
                }
            }
            if self.engine.check_win(current) {
                let summary = self.summary(current, turns);
                writeln!(
                    self.out,
                    "\n{} wins! All opponent ships have been sunk!",
                    summary.winner_name
                )?;
                info!("{} won after {} turns", summary.winner_name, turns);
                return Ok(summary);
            }
            current = current.opponent();
        }
    }

    fn take_shot(&mut self, id: PlayerId) -> anyhow::Result<(Coord, ShotOutcome)> {
        let player = &mut self.players[id.index()];
        for _ in 0..MAX_ATTEMPTS {
            let coord = match player.make_move(self.engine.shots(id)) {
                Ok(coord) => coord,
                Err(PlayerError::Rules(err)) => {
                    reject(&mut self.out, &mut **player, "move", &err)?;
                    continue;
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("{} failed to move", player.name()))
                }
            };
            if let Err(err) = self.engine.validate_move(id, coord) {
                reject(&mut self.out, &mut **player, "move", &err)?;
                continue;
            }
            return Ok((coord, self.engine.apply_move(id, coord)));
        }
        bail!(
            "{} made no legal move in {} attempts",
            player.name(),
            MAX_ATTEMPTS
        )
    }

    fn summary(&self, winner: PlayerId, turns: usize) -> GameSummary {
        let shots = PlayerId::ALL.map(|p| self.engine.shots(p).len());
        let hits = PlayerId::ALL.map(|p| self.engine.shots(p).hit_count());
        GameSummary {
            winner,
            winner_name: self.players[winner.index()].name().to_string(),
            turns,
            shots,
            hits,
        }
    }
}

/// Report a rejected `kind` of decision to the game output and the player.
fn reject(
    out: &mut impl Write,
    player: &mut dyn Player,
    kind: &str,
    err: &RulesError,
) -> anyhow::Result<()> {
    warn!("{} rejected: {}", player.name(), err);
    writeln!(out, "Invalid {}: {}. Please try again.", kind, err)?;
    player.handle_rejection(err);
    Ok(())
}
