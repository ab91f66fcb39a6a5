//! Ship definitions and placement geometry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::board::Coord;
use crate::core::common::RulesError;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Extends rightward along the start row.
    Horizontal,
    /// Extends downward along the start column.
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "H"),
            Orientation::Vertical => write!(f, "V"),
        }
    }
}

/// Accepts `h`/`v` or the full word, case insensitive.
impl FromStr for Orientation {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "horizontal" => Ok(Orientation::Horizontal),
            "v" | "vertical" => Ok(Orientation::Vertical),
            _ => Err(RulesError::MalformedPlacement(s.to_string())),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipType {
    name: String,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }

    /// Ship's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Cells a ship of this type covers when placed at `start`.
    ///
    /// Cells are produced in order from `start`; none are bounds-checked.
    pub fn cells(&self, start: Coord, orientation: Orientation) -> impl Iterator<Item = Coord> {
        (0..self.length).map(move |i| match orientation {
            Orientation::Horizontal => Coord::new(start.row, start.col + i),
            Orientation::Vertical => Coord::new(start.row + i, start.col),
        })
    }

    /// Last cell of the ship, the one that decides whether it fits.
    pub fn far_edge(&self, start: Coord, orientation: Orientation) -> Coord {
        let reach = self.length.saturating_sub(1);
        match orientation {
            Orientation::Horizontal => Coord::new(start.row, start.col + reach),
            Orientation::Vertical => Coord::new(start.row + reach, start.col),
        }
    }
}

/// Where a player wants a ship to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub start: Coord,
    pub orientation: Orientation,
}

impl Placement {
    pub fn new(start: impl Into<Coord>, orientation: Orientation) -> Self {
        Self {
            start: start.into(),
            orientation,
        }
    }
}

/// Parses free-form placement text such as `"0,0,h"` or `"1 2 v"`.
///
/// Exactly two unsigned numbers and one `h`/`v` letter must appear; any
/// other characters are ignored.
impl FromStr for Placement {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RulesError::MalformedPlacement(s.to_string());
        let mut numbers = Vec::new();
        let mut letters = Vec::new();
        let mut digits = String::new();
        for ch in s.chars().chain(std::iter::once(' ')) {
            if ch.is_ascii_digit() {
                digits.push(ch);
                continue;
            }
            if !digits.is_empty() {
                numbers.push(digits.parse::<usize>().map_err(|_| malformed())?);
                digits.clear();
            }
            if matches!(ch, 'h' | 'H' | 'v' | 'V') {
                letters.push(ch);
            }
        }
        match (numbers.as_slice(), letters.as_slice()) {
            ([row, col], [letter]) => Ok(Placement {
                start: Coord::new(*row, *col),
                orientation: letter.to_string().parse()?,
            }),
            _ => Err(malformed()),
        }
    }
}

/// A ship that has been placed on a board, with its damage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedShip {
    ship_type: ShipType,
    placement: Placement,
    hits: usize,
}

impl PlacedShip {
    pub(crate) fn new(ship_type: ShipType, placement: Placement) -> Self {
        Self {
            ship_type,
            placement,
            hits: 0,
        }
    }

    pub fn ship_type(&self) -> &ShipType {
        &self.ship_type
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        self.ship_type
            .cells(self.placement.start, self.placement.orientation)
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits >= self.ship_type.length()
    }

    pub(crate) fn register_hit(&mut self) {
        self.hits += 1;
    }
}
