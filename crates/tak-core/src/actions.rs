//! Commands a host can issue and the events they produce.
//!
//! This module defines all possible actions in the game and the events
//! that result from those actions.

use crate::board::Coord;
use crate::piece::{Player, StoneType};
use serde::{Deserialize, Serialize};

/// All commands the game session accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Start over on a board of the given size, discarding everything
    NewGame { size: usize },

    /// Place a piece from the reserve onto an empty cell
    Place { at: Coord, stone: StoneType },

    /// Lift the top `count` pieces of a stack into the hand.
    /// A count of zero only selects the cell.
    Pickup { at: Coord, count: usize },

    /// Carry the hand toward `destination`, dropping `drops[i]` pieces on
    /// the i-th cell along the way
    Move { destination: Coord, drops: Vec<usize> },

    /// Put the hand back where it came from
    Cancel,
}

/// How a finished game was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    Road,
    Flats,
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh game was set up
    NewGameStarted { size: usize },

    /// A piece left a reserve and landed on the board
    PiecePlaced {
        /// Player who issued the command
        by: Player,
        /// Player who owns the new piece (differs during the opening)
        owner: Player,
        at: Coord,
        stone: StoneType,
    },

    /// A cell was selected without lifting anything
    CellSelected { player: Player, at: Coord },

    /// Pieces were lifted into the hand
    StackPickedUp {
        player: Player,
        from: Coord,
        count: usize,
    },

    /// A wall was flattened by a capstone
    WallFlattened { at: Coord },

    /// The hand was dropped along a line
    StackMoved {
        player: Player,
        from: Coord,
        destination: Coord,
        drops: Vec<usize>,
    },

    /// The hand went back to its cell
    MoveCancelled { player: Player, at: Coord },

    /// Turn ended
    TurnEnded {
        player: Player,
        next_player: Player,
        turn: u32,
    },

    /// A player won the game
    GameWon { player: Player, reason: WinReason },

    /// Flat counts were equal when the game ended
    GameDrawn { flats: u32 },
}
