//! Rules engine: both players' boards, placement and move legality, hit
//! resolution and win detection.
//!
//! Validation and mutation are separate calls. `validate_placement` and
//! `validate_move` never touch state; `place_ship` and `apply_move` assume
//! the matching validation already passed and do not repeat it.

use std::collections::HashSet;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{
    board::{Board, Cell, Coord, Grid},
    common::{ConfigError, RulesError, ShotOutcome},
    config::{Fleet, GameConfig},
    ship::{Orientation, PlacedShip, Placement, ShipType},
};

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Get the opponent of this player.
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Recorded result of a fired shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shot {
    Hit,
    Miss,
}

/// Shots one player has fired at the opponent, keyed by coordinate.
#[derive(Clone, PartialEq, Eq)]
pub struct ShotLog {
    grid: Grid<Option<Shot>>,
    count: usize,
}

impl ShotLog {
    pub fn new(size: usize) -> Self {
        Self {
            grid: Grid::new(size),
            count: 0,
        }
    }

    pub fn board_size(&self) -> usize {
        self.grid.size()
    }

    pub fn get(&self, coord: Coord) -> Option<Shot> {
        self.grid.get(coord).copied().flatten()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.get(coord).is_some()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn hit_count(&self) -> usize {
        self.iter().filter(|(_, shot)| *shot == Shot::Hit).count()
    }

    /// Fired shots in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Shot)> + '_ {
        self.grid
            .iter()
            .filter_map(|(coord, shot)| shot.map(|shot| (coord, shot)))
    }

    /// Coordinates not yet fired at, row-major.
    pub fn untried(&self) -> impl Iterator<Item = Coord> + '_ {
        self.grid
            .iter()
            .filter(|(_, shot)| shot.is_none())
            .map(|(coord, _)| coord)
    }

    fn record(&mut self, coord: Coord, shot: Shot) {
        let slot = &mut self.grid[coord];
        if slot.is_none() {
            self.count += 1;
        }
        *slot = Some(shot);
    }
}

impl fmt::Debug for ShotLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(PlayerId),
}

#[derive(Debug, Clone)]
struct PlayerRecord {
    board: Board,
    fleet: Vec<PlacedShip>,
    shots: ShotLog,
    /// Opponent ship cells this player has not struck yet.
    hits_left: HashSet<Coord>,
}

impl PlayerRecord {
    fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            fleet: Vec::new(),
            shots: ShotLog::new(size),
            hits_left: HashSet::new(),
        }
    }
}

/// Core game logic holding both players' boards and shot history.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    players: [PlayerRecord; 2],
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Create an engine for a 10x10 board and a single Carrier.
    pub fn new() -> Self {
        Self::from_valid_config(GameConfig::default())
    }

    /// Create an engine for `config`, rejecting fleets that cannot fit.
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: GameConfig) -> Self {
        let size = config.board_size;
        Self {
            config,
            players: [PlayerRecord::new(size), PlayerRecord::new(size)],
        }
    }

    pub fn board_size(&self) -> usize {
        self.config.board_size
    }

    pub fn fleet(&self) -> &Fleet {
        &self.config.fleet
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn player(&self, player: PlayerId) -> &PlayerRecord {
        &self.players[player.index()]
    }

    fn player_mut(&mut self, player: PlayerId) -> &mut PlayerRecord {
        &mut self.players[player.index()]
    }

    fn ship_type(&self, name: &str) -> Result<&ShipType, RulesError> {
        self.config
            .fleet
            .get(name)
            .ok_or_else(|| RulesError::UnknownShipType(name.to_string()))
    }

    /// Immutable view of a player's own board.
    pub fn board(&self, player: PlayerId) -> &Board {
        &self.player(player).board
    }

    /// Ships a player has placed so far, in placement order.
    pub fn placed_ships(&self, player: PlayerId) -> &[PlacedShip] {
        &self.player(player).fleet
    }

    /// Shots fired by `player` at the opponent.
    pub fn shots(&self, player: PlayerId) -> &ShotLog {
        &self.player(player).shots
    }

    /// Opponent ship cells `player` still has to strike.
    pub fn hits_left(&self, player: PlayerId) -> &HashSet<Coord> {
        &self.player(player).hits_left
    }

    /// Fleet entries `player` has not placed yet, in fleet order.
    pub fn pending_ships(&self, player: PlayerId) -> impl Iterator<Item = &ShipType> + '_ {
        let placed = &self.player(player).fleet;
        self.config.fleet.iter().filter(move |ship| {
            !placed
                .iter()
                .any(|p| p.ship_type().name() == ship.name())
        })
    }

    pub fn is_fleet_placed(&self, player: PlayerId) -> bool {
        self.pending_ships(player).next().is_none()
    }

    /// Number of `player`'s own ships not yet sunk.
    pub fn ships_afloat(&self, player: PlayerId) -> usize {
        self.player(player)
            .fleet
            .iter()
            .filter(|ship| !ship.is_sunk())
            .count()
    }

    /// Check whether `ship_type` can be placed at `start` facing `orientation`
    /// on `player`'s board.
    pub fn validate_placement(
        &self,
        player: PlayerId,
        ship_type: &str,
        start: Coord,
        orientation: Orientation,
    ) -> Result<(), RulesError> {
        let ship = self.ship_type(ship_type)?;
        let size = self.board_size();
        if !start.in_bounds(size) {
            return Err(RulesError::out_of_bounds(start.row, start.col));
        }
        let edge = ship.far_edge(start, orientation);
        if !edge.in_bounds(size) {
            let off = match orientation {
                Orientation::Horizontal => Coord::new(start.row, size),
                Orientation::Vertical => Coord::new(size, start.col),
            };
            return Err(RulesError::out_of_bounds(off.row, off.col));
        }
        let board = &self.player(player).board;
        match ship.cells(start, orientation).find(|&c| board[c].is_ship()) {
            Some(taken) => Err(RulesError::Overlap(taken)),
            None => Ok(()),
        }
    }

    /// Place a ship whose placement was already validated.
    ///
    /// Marks the cells on `player`'s board and credits them to the
    /// opponent's `hits_left`, since the opponent is the one who must strike
    /// them.
    ///
    /// # Panics
    ///
    /// Panics if the placement leaves the board.
    pub fn place_ship(
        &mut self,
        player: PlayerId,
        ship_type: &str,
        start: Coord,
        orientation: Orientation,
    ) -> Result<(), RulesError> {
        let ship = self.ship_type(ship_type)?.clone();
        let cells: Vec<Coord> = ship.cells(start, orientation).collect();

        let owner = self.player_mut(player);
        let id = owner.fleet.len();
        for &cell in &cells {
            owner.board[cell] = Cell::Ship(id);
        }
        owner
            .fleet
            .push(PlacedShip::new(ship, Placement::new(start, orientation)));

        self.player_mut(player.opponent())
            .hits_left
            .extend(cells.iter().copied());
        debug!("{} placed {} at {} {}", player, ship_type, start, orientation);
        Ok(())
    }

    /// Check whether `player` may fire at `coord`.
    pub fn validate_move(&self, player: PlayerId, coord: Coord) -> Result<(), RulesError> {
        if !coord.in_bounds(self.board_size()) {
            return Err(RulesError::out_of_bounds(coord.row, coord.col));
        }
        if self.player(player).shots.contains(coord) {
            return Err(RulesError::AlreadyShot(coord));
        }
        Ok(())
    }

    /// Parse `"row, col"` text and validate it as a move for `player`.
    pub fn parse_move(&self, player: PlayerId, input: &str) -> Result<Coord, RulesError> {
        let coord: Coord = input.parse()?;
        self.validate_move(player, coord)?;
        Ok(coord)
    }

    /// Fire `player`'s validated shot at the opponent's board.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is off the board, or if a ship cell is struck that
    /// is no longer in `player`'s `hits_left` (the same move applied twice
    /// without validation).
    pub fn apply_move(&mut self, player: PlayerId, coord: Coord) -> ShotOutcome {
        let target = self.player_mut(player.opponent());
        let outcome = match target.board[coord] {
            Cell::Ship(id) => {
                let ship = &mut target.fleet[id];
                ship.register_hit();
                if ship.is_sunk() {
                    ShotOutcome::Sunk(ship.ship_type().name().to_string())
                } else {
                    ShotOutcome::Hit
                }
            }
            Cell::Empty => ShotOutcome::Miss,
        };

        let shooter = self.player_mut(player);
        if outcome.is_hit() {
            shooter.shots.record(coord, Shot::Hit);
            let removed = shooter.hits_left.remove(&coord);
            assert!(
                removed,
                "{} struck {} which was not an outstanding ship cell",
                player, coord
            );
        } else {
            shooter.shots.record(coord, Shot::Miss);
        }
        debug!("{} fired at {}: {:?}", player, coord, outcome);
        outcome
    }

    /// Returns `true` once `player` has struck every opponent ship cell.
    pub fn check_win(&self, player: PlayerId) -> bool {
        self.player(player).hits_left.is_empty()
    }

    /// Evaluate the current game status.
    ///
    /// Nobody has won until both fleets are placed.
    pub fn status(&self) -> GameStatus {
        if !PlayerId::ALL.iter().all(|&p| self.is_fleet_placed(p)) {
            return GameStatus::InProgress;
        }
        match PlayerId::ALL.into_iter().find(|&p| self.check_win(p)) {
            Some(winner) => GameStatus::Won(winner),
            None => GameStatus::InProgress,
        }
    }
}
