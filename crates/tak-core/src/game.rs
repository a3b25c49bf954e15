//! Core game state machine.
//!
//! This module contains the `GameState` session and all turn logic:
//! placement (including the opening swap), pickup, carrying and dropping a
//! stack, cancelling an in-progress move, and end-of-game evaluation.
//!
//! Every command either applies completely or is rejected with a
//! `GameError` and leaves the state exactly as it was.

use crate::actions::{GameAction, GameEvent, WinReason};
use crate::board::{Board, Coord};
use crate::inventory::{Inventory, DEFAULT_BOARD_SIZE};
use crate::movegen::{self, LegalMoves};
use crate::piece::{Piece, Player, Stack, StoneType};
use crate::road::{self, RoadLink};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Number of opening turns in which each player places an opponent's flat
const OPENING_TURNS: u32 = 2;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Turns 1 and 2: each player places one flat belonging to the opponent
    InitialPlacement,
    /// Normal turns: one placement or one stack move each
    Playing,
    /// Terminal; only a new game leaves this phase
    GameOver,
}

/// Result of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player(Player),
    Draw,
}

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Coordinate is off the board")]
    OutOfBounds,

    #[error("Cell is already occupied")]
    CellOccupied,

    #[error("Cell is empty")]
    CellEmpty,

    #[error("Top piece belongs to the other player")]
    NotOwner,

    #[error("No pieces of that kind remaining")]
    OutOfPieces,

    #[error("Invalid number of pieces to carry")]
    InvalidCarryCount,

    #[error("Destination is not in a straight line")]
    InvalidDirection,

    #[error("Path is blocked")]
    PathBlocked,

    #[error("Drop counts do not match the hand")]
    DropCountMismatch,

    #[error("Invalid action for current phase")]
    WrongPhase,

    #[error("No move in progress")]
    NoPendingMove,

    #[error("A move is already in progress")]
    MoveInProgress,

    #[error("Board size must be between 3 and 9")]
    InvalidBoardSize,
}

/// Everything a host needs to render the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub size: usize,
    /// `board[row][col]` is the stack at that cell, bottom to top
    pub board: Vec<Vec<Stack>>,
    pub active_player: Player,
    pub phase: GamePhase,
    pub winner: Option<Winner>,
    /// Reserves indexed by `Player::index`
    pub inventories: [Inventory; 2],
    pub hand: Vec<Piece>,
    pub selected_cell: Option<Coord>,
    pub turn: u32,
}

/// The complete game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current_player: Player,
    phase: GamePhase,
    winner: Option<Winner>,
    /// Turn number (starts at 1)
    turn: u32,
    inventories: [Inventory; 2],
    /// Pieces lifted but not yet dropped; `hand[0]` is dropped first
    hand: Vec<Piece>,
    /// Cell the hand came from, or a cell chosen for a later pickup
    selected: Option<Coord>,
}

impl GameState {
    /// Create a new game on a board of `size`
    pub fn new(size: usize) -> Result<Self, GameError> {
        let inventory = Inventory::for_board_size(size).ok_or(GameError::InvalidBoardSize)?;
        Ok(Self::with_inventory(size, inventory))
    }

    fn with_inventory(size: usize, inventory: Inventory) -> Self {
        Self {
            board: Board::new(size),
            current_player: Player::One,
            phase: GamePhase::InitialPlacement,
            winner: None,
            turn: 1,
            inventories: [inventory; 2],
            hand: Vec::new(),
            selected: None,
        }
    }

    // ==================== Queries ====================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Player whose turn it is
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Remaining reserve of `player`
    pub fn inventory(&self, player: Player) -> Inventory {
        self.inventories[player.index()]
    }

    pub fn hand(&self) -> &[Piece] {
        &self.hand
    }

    pub fn selected_cell(&self) -> Option<Coord> {
        self.selected
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Pieces on the board, in the hand, and in both reserves
    pub fn piece_total(&self) -> u32 {
        let reserves: u32 = self.inventories.iter().map(Inventory::total).sum();
        (self.board.piece_count() + self.hand.len()) as u32 + reserves
    }

    /// Flat-topped stacks per player, indexed by `Player::index`
    pub fn flat_counts(&self) -> [u32; 2] {
        self.board.flat_counts()
    }

    /// Adjacent road cells of `player`, for drawing road links
    pub fn road_connections(&self, player: Player) -> Vec<RoadLink> {
        road::road_connections(&self.board, player)
    }

    /// Most pieces the current player could lift from `at` right now.
    ///
    /// Zero when the cell is empty, off the board, owned by the opponent,
    /// or when the phase or a held hand forbids a pickup.
    pub fn max_pickup(&self, at: Coord) -> usize {
        if self.phase != GamePhase::Playing || !self.hand.is_empty() {
            return 0;
        }
        match self.board.get(at) {
            Ok(stack) => match stack.last() {
                Some(top) if top.owner == self.current_player => stack.len().min(self.size()),
                _ => 0,
            },
            Err(_) => 0,
        }
    }

    /// Legal destinations and drop sequences for the current hand
    pub fn legal_moves(&self) -> LegalMoves {
        match self.selected {
            Some(from) => movegen::legal_moves(&self.board, from, &self.hand),
            None => LegalMoves::new(),
        }
    }

    /// Full observable state
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            size: self.size(),
            board: self.board.rows(),
            active_player: self.current_player,
            phase: self.phase,
            winner: self.winner,
            inventories: self.inventories,
            hand: self.hand.clone(),
            selected_cell: self.selected,
            turn: self.turn,
        }
    }

    // ==================== Commands ====================

    /// Reset to a fresh game of `size`, discarding any move in progress
    pub fn new_game(&mut self, size: usize) -> Result<GameSnapshot, GameError> {
        self.apply_action(GameAction::NewGame { size })?;
        Ok(self.snapshot())
    }

    /// Place a piece from the reserve
    pub fn place(&mut self, at: Coord, stone: StoneType) -> Result<GameSnapshot, GameError> {
        self.apply_action(GameAction::Place { at, stone })?;
        Ok(self.snapshot())
    }

    /// Lift `count` pieces from `at` (or only select it when `count` is 0)
    pub fn pickup(&mut self, at: Coord, count: usize) -> Result<GameSnapshot, GameError> {
        self.apply_action(GameAction::Pickup { at, count })?;
        Ok(self.snapshot())
    }

    /// Drop the hand along the line toward `destination`
    pub fn move_stack(
        &mut self,
        destination: Coord,
        drops: &[usize],
    ) -> Result<GameSnapshot, GameError> {
        self.apply_action(GameAction::Move {
            destination,
            drops: drops.to_vec(),
        })?;
        Ok(self.snapshot())
    }

    /// Return the hand to its cell. Without a hand this only drops a
    /// count-0 selection, if there is one.
    pub fn cancel(&mut self) -> GameSnapshot {
        if let Err(err) = self.apply_action(GameAction::Cancel) {
            debug!(error = %err, "nothing to cancel");
            self.selected = None;
        }
        self.snapshot()
    }

    /// Apply an action to the game state
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        debug!(player = %self.current_player, turn = self.turn, ?action, "applying action");

        let result = match action {
            GameAction::NewGame { size } => self.apply_new_game(size),
            GameAction::Place { at, stone } => self.apply_place(at, stone),
            GameAction::Pickup { at, count } => self.apply_pickup(at, count),
            GameAction::Move { destination, drops } => self.apply_move(destination, &drops),
            GameAction::Cancel => self.apply_cancel(),
        };

        if let Err(err) = &result {
            debug!(error = %err, "action rejected");
        }
        result
    }

    fn apply_new_game(&mut self, size: usize) -> Result<Vec<GameEvent>, GameError> {
        *self = Self::new(size)?;
        info!(size, "new game started");
        Ok(vec![GameEvent::NewGameStarted { size }])
    }

    fn apply_place(&mut self, at: Coord, stone: StoneType) -> Result<Vec<GameEvent>, GameError> {
        let mover = self.current_player;

        let owner = match self.phase {
            GamePhase::GameOver => return Err(GameError::WrongPhase),
            GamePhase::InitialPlacement if stone != StoneType::Flat => {
                return Err(GameError::WrongPhase)
            }
            GamePhase::InitialPlacement => mover.opponent(),
            GamePhase::Playing => mover,
        };
        if !self.hand.is_empty() {
            return Err(GameError::MoveInProgress);
        }
        if !self.board.is_empty(at)? {
            return Err(GameError::CellOccupied);
        }

        let mut reserve = self.inventories[owner.index()];
        let taken = match stone {
            StoneType::Capstone => reserve.try_take_capstone(),
            StoneType::Flat | StoneType::Standing => reserve.try_take_stone(),
        };
        if !taken {
            return Err(GameError::OutOfPieces);
        }

        self.board.push(at, [Piece::new(owner, stone)])?;
        self.inventories[owner.index()] = reserve;
        self.selected = None;

        let mut events = vec![GameEvent::PiecePlaced {
            by: mover,
            owner,
            at,
            stone,
        }];
        events.extend(self.end_turn(mover));
        Ok(events)
    }

    fn apply_pickup(&mut self, at: Coord, count: usize) -> Result<Vec<GameEvent>, GameError> {
        if self.phase != GamePhase::Playing {
            return Err(GameError::WrongPhase);
        }
        if !self.hand.is_empty() {
            return Err(GameError::MoveInProgress);
        }

        let player = self.current_player;
        let height = self.board.height(at)?;
        if count > height.min(self.size()) {
            return Err(GameError::InvalidCarryCount);
        }
        // An empty cell only gets here with a count of 0
        let top = self.board.top_piece(at)?.ok_or(GameError::CellEmpty)?;
        if top.owner != player {
            return Err(GameError::NotOwner);
        }

        self.selected = Some(at);
        if count == 0 {
            return Ok(vec![GameEvent::CellSelected { player, at }]);
        }

        self.hand = self.board.pop_top(at, count)?;
        Ok(vec![GameEvent::StackPickedUp {
            player,
            from: at,
            count,
        }])
    }

    fn apply_move(&mut self, destination: Coord, drops: &[usize]) -> Result<Vec<GameEvent>, GameError> {
        if self.phase == GamePhase::GameOver {
            return Err(GameError::WrongPhase);
        }
        let from = match self.selected {
            Some(from) if !self.hand.is_empty() => from,
            _ => return Err(GameError::NoPendingMove),
        };

        let plan = movegen::plan_drops(&self.board, from, &self.hand, destination, drops)?;
        let mover = self.current_player;
        let mut events = Vec::new();

        if plan.flattens {
            self.board.flatten_top(destination)?;
            events.push(GameEvent::WallFlattened { at: destination });
        }

        let mut hand = std::mem::take(&mut self.hand);
        for (&cell, &count) in plan.path.iter().zip(&plan.drops) {
            self.board.push(cell, hand.drain(..count))?;
        }
        self.selected = None;

        events.push(GameEvent::StackMoved {
            player: mover,
            from,
            destination,
            drops: plan.drops,
        });
        events.extend(self.end_turn(mover));
        Ok(events)
    }

    fn apply_cancel(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if self.hand.is_empty() {
            return Err(GameError::NoPendingMove);
        }
        let at = self.selected.ok_or(GameError::NoPendingMove)?;
        let hand = std::mem::take(&mut self.hand);
        self.board.push(at, hand)?;
        self.selected = None;
        Ok(vec![GameEvent::MoveCancelled {
            player: self.current_player,
            at,
        }])
    }

    // ==================== Turn flow ====================

    fn end_turn(&mut self, mover: Player) -> Vec<GameEvent> {
        if let Some((winner, reason)) = self.evaluate_end(mover) {
            self.phase = GamePhase::GameOver;
            self.winner = Some(winner);
            info!(?winner, ?reason, turn = self.turn, "game over");
            let event = match winner {
                Winner::Player(player) => GameEvent::GameWon { player, reason },
                Winner::Draw => GameEvent::GameDrawn {
                    flats: self.board.flat_counts()[0],
                },
            };
            return vec![event];
        }

        self.current_player = mover.opponent();
        self.turn += 1;
        if self.phase == GamePhase::InitialPlacement && self.turn > OPENING_TURNS {
            self.phase = GamePhase::Playing;
        }

        vec![GameEvent::TurnEnded {
            player: mover,
            next_player: self.current_player,
            turn: self.turn,
        }]
    }

    /// Road first, then flats once the board is full or a reserve runs dry.
    fn evaluate_end(&self, mover: Player) -> Option<(Winner, WinReason)> {
        if let Some(player) = road::road_winner(&self.board, mover) {
            return Some((Winner::Player(player), WinReason::Road));
        }

        let reserve_empty = self.inventories.iter().any(Inventory::is_exhausted);
        if !self.board.is_full() && !reserve_empty {
            return None;
        }

        let [one, two] = self.board.flat_counts();
        let winner = match one.cmp(&two) {
            std::cmp::Ordering::Greater => Winner::Player(Player::One),
            std::cmp::Ordering::Less => Winner::Player(Player::Two),
            std::cmp::Ordering::Equal => Winner::Draw,
        };
        Some((winner, WinReason::Flats))
    }
}

impl Default for GameState {
    fn default() -> Self {
        let inventory = Inventory::for_board_size(DEFAULT_BOARD_SIZE).unwrap_or_default();
        Self::with_inventory(DEFAULT_BOARD_SIZE, inventory)
    }
}
