//! Square game grids stored as flat row-major arenas.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::common::RulesError;

/// A `(row, col)` position on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns `true` when both components lie inside a `size`x`size` board.
    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Parses `"row, col"`. Commas and whitespace both separate the two numbers.
///
/// Anything other than exactly two integers is `MalformedCoordinate`; a
/// negative component is `OutOfBounds` since no board contains it.
impl FromStr for Coord {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RulesError::MalformedCoordinate(s.to_string());
        let parts: Vec<&str> = s
            .split(|ch: char| ch == ',' || ch.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        let [row, col] = parts.as_slice() else {
            return Err(malformed());
        };
        let row: i64 = row.parse().map_err(|_| malformed())?;
        let col: i64 = col.parse().map_err(|_| malformed())?;
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(row), Ok(col)) => Ok(Coord { row, col }),
            _ => Err(RulesError::OutOfBounds { row, col }),
        }
    }
}

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Occupied by the owner's ship with this index into its fleet.
    Ship(usize),
}

impl Cell {
    pub fn is_ship(&self) -> bool {
        matches!(self, Cell::Ship(_))
    }
}

/// Fixed-size square grid with O(1) bounds-checked access.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    /// Create a `size`x`size` grid filled with `T::default()`.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![T::default(); size * size],
        }
    }
}

impl<T> Grid<T> {
    /// Length of one side of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    fn offset(&self, coord: Coord) -> Option<usize> {
        coord
            .in_bounds(self.size)
            .then(|| coord.row * self.size + coord.col)
    }

    pub fn get(&self, coord: Coord) -> Option<&T> {
        self.offset(coord).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut T> {
        self.offset(coord).map(move |i| &mut self.cells[i])
    }

    /// Iterate all cells in row-major order with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Coord::new(i / size, i % size), cell))
    }
}

/// Panics when `coord` is off the grid.
impl<T> Index<Coord> for Grid<T> {
    type Output = T;

    fn index(&self, coord: Coord) -> &T {
        match self.offset(coord) {
            Some(i) => &self.cells[i],
            None => panic!("{} is outside the {}x{} grid", coord, self.size, self.size),
        }
    }
}

impl<T> IndexMut<Coord> for Grid<T> {
    fn index_mut(&mut self, coord: Coord) -> &mut T {
        match self.offset(coord) {
            Some(i) => &mut self.cells[i],
            None => panic!("{} is outside the {}x{} grid", coord, self.size, self.size),
        }
    }
}

/// A player's own ship occupancy grid.
pub type Board = Grid<Cell>;

impl Board {
    /// Coordinates of every ship cell, row-major.
    pub fn ship_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.iter()
            .filter(|(_, cell)| cell.is_ship())
            .map(|(coord, _)| coord)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let ch = if self[Coord::new(row, col)].is_ship() {
                    'S'
                } else {
                    '.'
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
