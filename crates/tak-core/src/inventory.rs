//! Per-player piece reserves and the board-size table they start from.

use serde::{Deserialize, Serialize};

/// Smallest playable board
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest playable board
pub const MAX_BOARD_SIZE: usize = 9;

/// Board size used when the host does not ask for one
pub const DEFAULT_BOARD_SIZE: usize = 5;

/// Pieces a player still has to place.
///
/// Counts only ever go down during a game; a new game resets them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub stones: u32,
    pub capstones: u32,
}

impl Inventory {
    /// Create an inventory with specific amounts
    pub const fn new(stones: u32, capstones: u32) -> Self {
        Self { stones, capstones }
    }

    /// Starting allotment for one player on a board of `size`.
    ///
    /// Returns `None` outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    pub fn for_board_size(size: usize) -> Option<Self> {
        let (stones, capstones) = match size {
            3 => (10, 0),
            4 => (15, 0),
            5 => (21, 1),
            6 => (30, 1),
            7 => (40, 2),
            8 => (50, 2),
            9 => (60, 2),
            _ => return None,
        };
        Some(Self::new(stones, capstones))
    }

    /// Total pieces left
    pub fn total(&self) -> u32 {
        self.stones + self.capstones
    }

    /// True once both stones and capstones are used up
    pub fn is_exhausted(&self) -> bool {
        self.total() == 0
    }

    /// Take one stone, returning false if none remain
    pub fn try_take_stone(&mut self) -> bool {
        if self.stones == 0 {
            return false;
        }
        self.stones -= 1;
        true
    }

    /// Take one capstone, returning false if none remain
    pub fn try_take_capstone(&mut self) -> bool {
        if self.capstones == 0 {
            return false;
        }
        self.capstones -= 1;
        true
    }
}
