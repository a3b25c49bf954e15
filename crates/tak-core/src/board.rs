//! Board representation: coordinates, directions, and the N×N grid of stacks.
//!
//! This module contains:
//! - `Coord`: a (row, col) cell address, row 0 at the top
//! - `Direction`: the four orthogonal directions a stack can travel
//! - `Board`: the grid itself with bounds-checked lookup and mutation
//!
//! The board knows nothing about turns or legality. It only guarantees that
//! every access is in bounds and that pieces are moved, never lost.

use crate::game::GameError;
use crate::piece::{Piece, Player, Stack, StoneType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of a cell. Row 0 is the top edge, column 0 the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Create a new coordinate
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell in `direction`, if it is on a board of `size`
    pub fn step(&self, direction: Direction, size: usize) -> Option<Coord> {
        let (dr, dc) = direction.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        if row < size && col < size {
            Some(Coord::new(row, col))
        } else {
            None
        }
    }

    /// The orthogonal neighbours that lie on a board of `size`
    pub fn neighbors(&self, size: usize) -> impl Iterator<Item = Coord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.step(dir, size))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward row 0
    North,
    /// Toward the last row
    South,
    /// Toward the last column
    East,
    /// Toward column 0
    West,
}

impl Direction {
    /// All directions, in the order moves are enumerated
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
    ];

    /// (row delta, col delta) of one step
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    /// Direction and step count from `from` to `to`.
    ///
    /// Returns `None` when the two cells are equal or not on a shared row
    /// or column.
    pub fn between(from: Coord, to: Coord) -> Option<(Direction, usize)> {
        if from.row == to.row && from.col != to.col {
            if to.col > from.col {
                Some((Direction::East, to.col - from.col))
            } else {
                Some((Direction::West, from.col - to.col))
            }
        } else if from.col == to.col && from.row != to.row {
            if to.row > from.row {
                Some((Direction::South, to.row - from.row))
            } else {
                Some((Direction::North, from.row - to.row))
            }
        } else {
            None
        }
    }
}

/// The N×N grid of stacks, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Stack>,
}

impl Board {
    /// Create an empty board
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Vec::new(); size * size],
        }
    }

    /// Side length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `coord` lies on this board
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    fn index(&self, coord: Coord) -> Result<usize, GameError> {
        if self.contains(coord) {
            Ok(coord.row * self.size + coord.col)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// The stack at `coord`, bottom to top
    pub fn get(&self, coord: Coord) -> Result<&Stack, GameError> {
        let idx = self.index(coord)?;
        Ok(&self.cells[idx])
    }

    /// The visible piece at `coord`, if any
    pub fn top_piece(&self, coord: Coord) -> Result<Option<Piece>, GameError> {
        Ok(self.get(coord)?.last().copied())
    }

    /// Whether the cell holds no pieces
    pub fn is_empty(&self, coord: Coord) -> Result<bool, GameError> {
        Ok(self.get(coord)?.is_empty())
    }

    /// Number of pieces at `coord`
    pub fn height(&self, coord: Coord) -> Result<usize, GameError> {
        Ok(self.get(coord)?.len())
    }

    /// Put pieces on top of the stack at `coord`, first piece lowest
    pub fn push<I>(&mut self, coord: Coord, pieces: I) -> Result<(), GameError>
    where
        I: IntoIterator<Item = Piece>,
    {
        let idx = self.index(coord)?;
        self.cells[idx].extend(pieces);
        Ok(())
    }

    /// Lift the top `count` pieces off `coord`, keeping their order
    /// (bottom of the lifted part first).
    pub fn pop_top(&mut self, coord: Coord, count: usize) -> Result<Vec<Piece>, GameError> {
        let idx = self.index(coord)?;
        let stack = &mut self.cells[idx];
        if count > stack.len() {
            return Err(GameError::InvalidCarryCount);
        }
        let split = stack.len() - count;
        Ok(stack.split_off(split))
    }

    /// Turn a standing top at `coord` into a flat. Returns false if the top
    /// is not a wall.
    pub(crate) fn flatten_top(&mut self, coord: Coord) -> Result<bool, GameError> {
        let idx = self.index(coord)?;
        match self.cells[idx].last_mut() {
            Some(top) if top.stone.is_flattenable() => {
                top.stone = StoneType::Flat;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Every coordinate, row by row
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|stack| !stack.is_empty())
    }

    /// Total pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    /// Flat-topped stacks per player, indexed by `Player::index`
    pub fn flat_counts(&self) -> [u32; 2] {
        let mut counts = [0; 2];
        for top in self.cells.iter().filter_map(|stack| stack.last()) {
            if top.stone.counts_as_flat() {
                counts[top.owner.index()] += 1;
            }
        }
        counts
    }

    /// Whether `player` owns the visible piece at `coord` and it can carry a road
    pub fn is_road_cell(&self, coord: Coord, player: Player) -> bool {
        matches!(self.top_piece(coord), Ok(Some(top)) if top.is_road_for(player))
    }

    /// Rows of stacks, for snapshots and renderers
    pub fn rows(&self) -> Vec<Vec<Stack>> {
        self.cells.chunks(self.size.max(1)).map(<[Stack]>::to_vec).collect()
    }
}
