use serde::{Deserialize, Serialize};

use crate::core::common::ConfigError;
use crate::core::ship::ShipType;

pub const BOARD_SIZE: usize = 10;

/// The five-ship fleet of the classic game.
pub const CLASSIC_SHIPS: [(&str, usize); 5] = [
    ("Carrier", 5),
    ("Battleship", 4),
    ("Cruiser", 3),
    ("Submarine", 3),
    ("Destroyer", 2),
];

/// Ordered set of ship types every player must place before battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ShipType>", into = "Vec<ShipType>")]
pub struct Fleet {
    ships: Vec<ShipType>,
}

impl Fleet {
    /// Build a fleet, rejecting an empty list, empty names, duplicates and
    /// zero lengths.
    pub fn new(ships: Vec<ShipType>) -> Result<Self, ConfigError> {
        if ships.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        for (i, ship) in ships.iter().enumerate() {
            if ship.name().is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if ship.length() == 0 {
                return Err(ConfigError::ZeroLength(ship.name().to_string()));
            }
            if ships[..i].iter().any(|other| other.name() == ship.name()) {
                return Err(ConfigError::DuplicateShip(ship.name().to_string()));
            }
        }
        Ok(Self { ships })
    }

    /// Carrier, Battleship, Cruiser, Submarine and Destroyer.
    pub fn classic() -> Self {
        Self {
            ships: CLASSIC_SHIPS
                .iter()
                .map(|&(name, length)| ShipType::new(name, length))
                .collect(),
        }
    }

    /// Look up a ship type by name.
    pub fn get(&self, name: &str) -> Option<&ShipType> {
        self.ships.iter().find(|ship| ship.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShipType> {
        self.ships.iter()
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Sum of all ship lengths: the cells each player must strike to win.
    pub fn total_cells(&self) -> usize {
        self.ships.iter().map(ShipType::length).sum()
    }
}

/// A single Carrier of length 5.
impl Default for Fleet {
    fn default() -> Self {
        Self {
            ships: vec![ShipType::new(CLASSIC_SHIPS[0].0, CLASSIC_SHIPS[0].1)],
        }
    }
}

impl TryFrom<Vec<ShipType>> for Fleet {
    type Error = ConfigError;

    fn try_from(ships: Vec<ShipType>) -> Result<Self, Self::Error> {
        Fleet::new(ships)
    }
}

impl From<Fleet> for Vec<ShipType> {
    fn from(fleet: Fleet) -> Self {
        fleet.ships
    }
}

/// Board size and fleet for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    pub fleet: Fleet,
}

impl GameConfig {
    pub fn new(board_size: usize, fleet: Fleet) -> Result<Self, ConfigError> {
        let config = Self { board_size, fleet };
        config.validate()?;
        Ok(config)
    }

    /// Every ship must fit on the board in at least one orientation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if let Some(ship) = self.fleet.iter().find(|s| s.length() > self.board_size) {
            return Err(ConfigError::ShipTooLong {
                name: ship.name().to_string(),
                length: ship.length(),
                board_size: self.board_size,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            fleet: Fleet::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fleet_is_single_carrier() {
        let fleet = Fleet::default();
        assert_eq!(fleet.len(), 1);
        assert_eq!(fleet.get("Carrier").map(ShipType::length), Some(5));
        assert_eq!(fleet.total_cells(), 5);
    }

    #[test]
    fn classic_fleet_totals_seventeen_cells() {
        assert_eq!(Fleet::classic().total_cells(), 17);
    }

    #[test]
    fn rejects_bad_fleets() {
        assert_eq!(
            Fleet::new(vec![ShipType::new("Sub", 3), ShipType::new("Sub", 2)]),
            Err(ConfigError::DuplicateShip("Sub".into()))
        );
        assert_eq!(
            Fleet::new(vec![ShipType::new("Raft", 0)]),
            Err(ConfigError::ZeroLength("Raft".into()))
        );
        assert_eq!(
            Fleet::new(vec![ShipType::new("", 2)]),
            Err(ConfigError::EmptyName)
        );
    }

    #[test]
    fn rejects_empty_fleet() {
        assert_eq!(Fleet::new(Vec::new()), Err(ConfigError::EmptyFleet));
        assert!(GameConfig::from_json(r#"{"fleet": []}"#).is_err());
        assert!(GameConfig::from_json(r#"{"board_size": 6, "fleet": []}"#).is_err());
    }

    #[test]
    fn rejects_ship_longer_than_board() {
        let err = GameConfig::new(4, Fleet::default()).unwrap_err();
        assert!(matches!(err, ConfigError::ShipTooLong { length: 5, .. }));
        assert_eq!(GameConfig::new(0, Fleet::default()), Err(ConfigError::EmptyBoard));
    }

    #[test]
    fn json_config_round_trips_through_validation() {
        let config = GameConfig::from_json(
            r#"{"board_size": 8, "fleet": [{"name": "Cruiser", "length": 3}]}"#,
        )
        .unwrap();
        assert_eq!(config.board_size, 8);
        assert_eq!(config.fleet.get("Cruiser").map(ShipType::length), Some(3));

        assert!(GameConfig::from_json(r#"{"board_size": 3}"#).is_err());
        assert!(GameConfig::from_json(
            r#"{"fleet": [{"name": "A", "length": 2}, {"name": "A", "length": 2}]}"#
        )
        .is_err());
    }
}
