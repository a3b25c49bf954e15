//! Players, stone types, and the pieces that make up a stack.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two sides.
///
/// Each player also selects a road axis: Player One connects the top and
/// bottom edges (row 0 to row N-1), Player Two connects the left and right
/// edges (column 0 to column N-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Both players in turn order
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// Get the opponent player.
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index into per-player arrays (0 or 1)
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/// The three shapes a piece can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoneType {
    /// Lying flat; counts for roads and for flat majority
    Flat,
    /// A wall; blocks roads and movement, counts for nothing
    Standing,
    /// Counts for roads, never for flat majority, flattens walls
    Capstone,
}

impl StoneType {
    /// Whether a stack topped by this shape can be part of a road
    pub fn is_road_eligible(self) -> bool {
        match self {
            StoneType::Flat | StoneType::Capstone => true,
            StoneType::Standing => false,
        }
    }

    /// Whether a stack topped by this shape counts toward flat majority
    pub fn counts_as_flat(self) -> bool {
        match self {
            StoneType::Flat => true,
            StoneType::Standing | StoneType::Capstone => false,
        }
    }

    /// Whether a carried stack may pass over or land on this shape
    pub fn blocks_movement(self) -> bool {
        match self {
            StoneType::Flat => false,
            StoneType::Standing | StoneType::Capstone => true,
        }
    }

    /// Whether a lone capstone may flatten this shape
    pub fn is_flattenable(self) -> bool {
        match self {
            StoneType::Standing => true,
            StoneType::Flat | StoneType::Capstone => false,
        }
    }
}

/// A single piece. Owner never changes; shape changes at most once
/// (Standing to Flat) when a capstone flattens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Player,
    pub stone: StoneType,
}

impl Piece {
    /// Create a new piece
    pub const fn new(owner: Player, stone: StoneType) -> Self {
        Self { owner, stone }
    }

    pub const fn flat(owner: Player) -> Self {
        Self::new(owner, StoneType::Flat)
    }

    pub const fn standing(owner: Player) -> Self {
        Self::new(owner, StoneType::Standing)
    }

    pub const fn capstone(owner: Player) -> Self {
        Self::new(owner, StoneType::Capstone)
    }

    /// Whether this piece, as a stack top, extends `player`'s road
    pub fn is_road_for(&self, player: Player) -> bool {
        self.owner == player && self.stone.is_road_eligible()
    }
}

/// Contents of a cell, bottom to top.
pub type Stack = Vec<Piece>;
